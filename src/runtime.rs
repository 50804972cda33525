//! Runtime for executing the chat session
//!
//! Owns the single event queue. Terminal input and background results are
//! both delivered as [`Event`]s and processed strictly in arrival order.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::*;

use crate::state_machine::Event;
use tokio::sync::mpsc;

/// Capacity of the shared input/result queue
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Create the event queue shared by the input reader and the runtime
pub fn event_channel() -> (mpsc::Sender<Event>, mpsc::Receiver<Event>) {
    mpsc::channel(EVENT_QUEUE_CAPACITY)
}
