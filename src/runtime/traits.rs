//! Trait abstractions for runtime I/O
//!
//! The network side is `crate::agent_api::AgentService`; this is the display side.

use crate::state_machine::Snapshot;

/// Receives a fresh snapshot after every processed event
pub trait Presenter: Send {
    /// Draw the snapshot; an error stops the runtime
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), String>;
}

impl<T: Presenter + ?Sized> Presenter for Box<T> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), String> {
        (**self).render(snapshot)
    }
}
