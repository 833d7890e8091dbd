//! Bounded event queue between interrupt handlers and tasks
//!
//! Producers never wait: [`EventQueue::try_enqueue`] either stores the
//! item or discards it (drop-newest) and counts the drop. Consumers wait
//! in [`EventQueue::receive`], optionally bounded by a deadline future.
//!
//! Built on an `embassy-sync` channel behind a critical-section mutex, so
//! one instance can live in a `static` and be shared between interrupt and
//! thread context.

use core::future::Future;
use core::sync::atomic::{AtomicU32, Ordering};

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// The queue was full; the item was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

/// Non-blocking producer side of a queue
pub trait EventSink<T> {
    /// Store `item`, or discard it if there is no room
    fn try_enqueue(&self, item: T) -> Result<(), QueueFull>;
}

/// Fixed-capacity FIFO with drop-newest overflow
pub struct EventQueue<T, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
    dropped: AtomicU32,
}

impl<T, const N: usize> Default for EventQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> EventQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue without waiting
    ///
    /// On a full queue the new item is discarded and the queued items stay
    /// as they are. Safe to call from interrupt context.
    pub fn try_enqueue(&self, item: T) -> Result<(), QueueFull> {
        self.channel.try_send(item).map_err(|_| {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            QueueFull
        })
    }

    /// Wait for the oldest item
    pub async fn receive(&self) -> T {
        self.channel.receive().await
    }

    /// Wait for the oldest item until `deadline` completes
    ///
    /// Returns `None` on timeout. Any future works as the deadline, e.g.
    /// `embassy_time::Timer::after_millis(100)`.
    pub async fn receive_until<F: Future>(&self, deadline: F) -> Option<T> {
        match select(self.channel.receive(), deadline).await {
            Either::First(item) => Some(item),
            Either::Second(_) => None,
        }
    }

    /// Take the oldest item if one is queued
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Items discarded because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T, const N: usize> EventSink<T> for EventQueue<T, N> {
    fn try_enqueue(&self, item: T) -> Result<(), QueueFull> {
        EventQueue::try_enqueue(self, item)
    }
}
