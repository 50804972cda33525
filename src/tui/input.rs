//! Terminal input: crossterm keys to state machine events

use crate::state_machine::Event;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::thread;
use tokio::sync::mpsc;

/// Map one key press to an event; unrecognised keys map to nothing
pub fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Event::Quit),
        KeyCode::Esc => Some(Event::Quit),
        KeyCode::Up => Some(Event::MoveUp),
        KeyCode::Down => Some(Event::MoveDown),
        KeyCode::Enter => Some(Event::Submit),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Char(' ') => Some(Event::Space),
        KeyCode::Char(c) if !ctrl && !alt => Some(Event::Text(c.to_string())),
        _ => None,
    }
}

/// Read terminal input on a dedicated thread and forward it to the queue
///
/// `crossterm::event::read` blocks, so this stays off the async runtime.
/// The thread ends when the queue closes or the terminal read fails.
pub fn spawn_input_reader(
    event_tx: mpsc::Sender<Event>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("terminal-input".to_string())
        .spawn(move || loop {
            match event::read() {
                Ok(CrosstermEvent::Key(key)) => {
                    let Some(event) = map_key(key) else {
                        continue;
                    };
                    if event_tx.blocking_send(event).is_err() {
                        tracing::debug!("Event queue closed, stopping input reader");
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Terminal read failed");
                    let _ = event_tx.blocking_send(Event::Quit);
                    break;
                }
            }
        })
}
