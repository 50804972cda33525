//! Interaction state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! `(AppState, Event) -> (AppState, Option<Effect>)`.

mod effect;
pub mod event;
pub mod snapshot;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use snapshot::Snapshot;
pub use state::{AppState, Connection, Pending, Role, Utterance};
pub use transition::{startup_effect, transition, TransitionError, TransitionResult};
