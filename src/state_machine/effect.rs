//! Effects produced by state transitions

use crate::agent_api::SessionIdentity;

/// Work the runtime performs after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up agents in the directory (background)
    DiscoverAgents,

    /// Send one utterance to the connected agent (background)
    SendMessage {
        agent_id: String,
        text: String,
        identity: SessionIdentity,
    },

    /// Stop the event loop
    Quit,
}

impl Effect {
    pub fn send_message(
        agent_id: impl Into<String>,
        text: impl Into<String>,
        identity: SessionIdentity,
    ) -> Self {
        Effect::SendMessage {
            agent_id: agent_id.into(),
            text: text.into(),
            identity,
        }
    }

    /// Whether this effect starts a network operation
    pub fn is_async(&self) -> bool {
        matches!(self, Effect::DiscoverAgents | Effect::SendMessage { .. })
    }
}
