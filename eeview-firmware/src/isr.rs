//! EXTI interrupt vectors
//!
//! Lines 0 and 1 carry the encoder channels and forward a snapshot; line 2
//! (the push switch) is only acknowledged.

use eeview_core::{EdgeHandler, EventQueue, RawInputEvent};
use eeview_hal_stm32f4::Mmio;
use embassy_stm32::interrupt;

use crate::channels::{INPUT_QUEUE, REGS};
use crate::config::board::{ENCODER_A, ENCODER_B, INPUT_QUEUE_CAPACITY};

type InputQueue = EventQueue<RawInputEvent, INPUT_QUEUE_CAPACITY>;

static EDGES: EdgeHandler<'static, Mmio, InputQueue> =
    EdgeHandler::new(&REGS, &INPUT_QUEUE, ENCODER_A, ENCODER_B);

// Drops are counted by the queue and reported by the encoder task

#[interrupt]
fn EXTI0() {
    let _ = EDGES.on_edge(0);
}

#[interrupt]
fn EXTI1() {
    let _ = EDGES.on_edge(1);
}

#[interrupt]
fn EXTI2() {
    EDGES.acknowledge(2);
}
