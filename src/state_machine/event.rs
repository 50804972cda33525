//! Events that can occur in a chat session

use crate::agent_api::{ApiError, Discovery, Reply};

/// Events that trigger state transitions
///
/// Terminal input and async results share this type and one queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Input events
    Quit,
    MoveUp,
    MoveDown,
    /// Enter: confirms a selection or submits the compose buffer
    Submit,
    Backspace,
    Space,
    /// One or more printable characters
    Text(String),

    // Directory events
    AgentsDiscovered { discovery: Discovery },
    /// Error classification is logged by the service wrapper; only the
    /// message reaches the state
    DiscoveryFailed { message: String },

    // Message exchange events
    ReplyReceived { reply: Reply },
    SendFailed { message: String },
}

impl Event {
    pub fn from_discovery(result: Result<Discovery, ApiError>) -> Self {
        match result {
            Ok(discovery) => Event::AgentsDiscovered { discovery },
            Err(e) => Event::DiscoveryFailed { message: e.message },
        }
    }

    pub fn from_reply(result: Result<Reply, ApiError>) -> Self {
        match result {
            Ok(reply) => Event::ReplyReceived { reply },
            Err(e) => Event::SendFailed { message: e.message },
        }
    }

    /// Whether this event edits or submits the compose buffer
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            Event::Submit | Event::Backspace | Event::Space | Event::Text(_)
        )
    }
}
