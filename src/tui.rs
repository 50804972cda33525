//! Terminal presentation layer
//!
//! Draws snapshots with ratatui and turns key presses into events. Holds no
//! application state of its own.

mod bender;
mod input;
mod render;
mod terminal;

pub use input::spawn_input_reader;

use crate::runtime::Presenter;
use crate::state_machine::Snapshot;
use terminal::ChatTerminal;

/// Presenter that owns the real terminal
///
/// Raw mode and the alternate screen are left when this is dropped.
pub struct TerminalPresenter {
    terminal: ChatTerminal,
}

impl TerminalPresenter {
    pub fn new() -> std::io::Result<Self> {
        let terminal = terminal::setup_terminal()?;
        Ok(Self { terminal })
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), String> {
        self.terminal
            .draw(|frame| render::draw(frame, snapshot))
            .map(|_| ())
            .map_err(|e| format!("Failed to draw frame: {e}"))
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        if let Err(e) = terminal::restore_terminal() {
            tracing::error!(error = %e, "Failed to restore terminal");
        }
    }
}
