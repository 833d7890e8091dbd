//! Encoder task
//!
//! Decodes raw edge snapshots into positions for the display task.

use defmt::*;
use eeview_core::pipeline::{forward_next, Forward};
use eeview_core::traits::EncoderProcessor;
use eeview_core::viewer::MAX_POSITION;
use eeview_drivers::QuadratureEncoder;

use crate::channels::{INPUT_QUEUE, POSITION_QUEUE};

#[embassy_executor::task]
pub async fn encoder_task(mut encoder: QuadratureEncoder) {
    encoder.init(0, MAX_POSITION);
    info!("Encoder task started, range 0..={}", MAX_POSITION);

    let mut input_drops = 0;
    loop {
        match forward_next(&mut encoder, &INPUT_QUEUE, &POSITION_QUEUE).await {
            Forward::Sent(event) => debug!("Position {}", event.position),
            Forward::Dropped(event) => {
                warn!("Position queue full, dropped {}", event.position)
            }
            Forward::Unchanged => {}
        }

        // Counted in interrupt context; reported here
        let dropped = INPUT_QUEUE.dropped();
        if dropped != input_drops {
            warn!("Input queue overflow, {} edges dropped", dropped);
            input_drops = dropped;
        }
    }
}
