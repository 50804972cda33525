//! Pure state transition function
//!
//! Given the same state and event this always produces the same next state
//! and effect, with no I/O.

use super::state::{AppState, Connection, Pending, Utterance};
use super::{Effect, Event};
use crate::agent_api::{AgentInfo, Discovery};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: AppState,
    /// At most one effect per transition
    pub effect: Option<Effect>,
}

impl TransitionResult {
    pub fn new(state: AppState) -> Self {
        Self {
            new_state: state,
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Events the machine declines; the state stays as it was
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A request is already in flight")]
    Busy,
    #[error("Nothing to send")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Effect to run once at startup for the initial state
pub fn startup_effect(state: &AppState) -> Option<Effect> {
    match state.pending {
        Some(Pending::Discovery) => Some(Effect::DiscoverAgents),
        _ => None,
    }
}

/// Pure transition function
#[allow(clippy::too_many_lines)] // One arm per row of the transition table
pub fn transition(state: &AppState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (&state.connection, event) {
        // Quit is accepted everywhere
        (_, Event::Quit) => Ok(TransitionResult::new(state.clone()).with_effect(Effect::Quit)),

        // No typing or submitting while a request is outstanding
        (_, event) if state.is_pending() && event.is_text_input() => Err(TransitionError::Busy),

        // ============================================================
        // Discovery
        // ============================================================

        (Connection::Discovering, Event::AgentsDiscovered { discovery }) => {
            let mut next = state.clone();
            next.pending = None;
            match discovery {
                Discovery::Single(agent) => connect(&mut next, &agent),
                Discovery::Multiple(candidates) if candidates.is_empty() => {
                    fail_discovery(&mut next, "no active agents found".to_string());
                }
                Discovery::Multiple(candidates) => {
                    next.last_error = None;
                    next.connection = Connection::Selecting {
                        candidates,
                        cursor: 0,
                    };
                }
            }
            Ok(TransitionResult::new(next))
        }

        (Connection::Discovering, Event::DiscoveryFailed { message }) => {
            let mut next = state.clone();
            next.pending = None;
            fail_discovery(&mut next, message);
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Agent Selection
        // ============================================================

        (Connection::Selecting { candidates, cursor }, Event::MoveUp) => {
            let mut next = state.clone();
            next.connection = Connection::Selecting {
                candidates: candidates.clone(),
                cursor: cursor.saturating_sub(1),
            };
            Ok(TransitionResult::new(next))
        }

        (Connection::Selecting { candidates, cursor }, Event::MoveDown) => {
            let mut next = state.clone();
            let last = candidates.len().saturating_sub(1);
            next.connection = Connection::Selecting {
                candidates: candidates.clone(),
                cursor: (*cursor + 1).min(last),
            };
            Ok(TransitionResult::new(next))
        }

        (Connection::Selecting { candidates, cursor }, Event::Submit) => {
            let agent = candidates.get(*cursor).ok_or_else(|| {
                TransitionError::InvalidTransition(format!(
                    "selection cursor {cursor} out of range for {} candidates",
                    candidates.len()
                ))
            })?;
            let mut next = state.clone();
            connect(&mut next, agent);
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Composing
        // ============================================================

        (Connection::Connected { .. }, Event::Text(text)) => {
            let mut next = state.clone();
            next.compose.push_str(&text);
            Ok(TransitionResult::new(next))
        }

        (Connection::Connected { .. }, Event::Space) => {
            let mut next = state.clone();
            next.compose.push(' ');
            Ok(TransitionResult::new(next))
        }

        (Connection::Connected { .. }, Event::Backspace) => {
            let mut next = state.clone();
            next.compose.pop();
            Ok(TransitionResult::new(next))
        }

        (Connection::Connected { .. }, Event::Submit) if state.compose.is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        (Connection::Connected { agent_id, .. }, Event::Submit) => {
            let mut next = state.clone();
            let text = std::mem::take(&mut next.compose);
            next.transcript.push(Utterance::user(text.clone()));
            next.pending = Some(Pending::Send { text: text.clone() });
            Ok(TransitionResult::new(next).with_effect(Effect::send_message(
                agent_id.clone(),
                text,
                state.identity.clone(),
            )))
        }

        // ============================================================
        // Message Exchange
        // ============================================================

        (Connection::Connected { .. }, Event::ReplyReceived { reply })
            if matches!(state.pending, Some(Pending::Send { .. })) =>
        {
            let mut next = state.clone();
            next.pending = None;
            next.last_error = None;
            next.transcript.push(Utterance::agent(reply.text));
            Ok(TransitionResult::new(next))
        }

        // Failure is per message: stay connected, hand the text back
        (Connection::Connected { .. }, Event::SendFailed { message })
            if matches!(state.pending, Some(Pending::Send { .. })) =>
        {
            let mut next = state.clone();
            if let Some(Pending::Send { text }) = next.pending.take() {
                if next.compose.is_empty() {
                    next.compose = text;
                }
            }
            next.last_error = Some(message);
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================

        (connection, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {:?}",
            connection.name(),
            event
        ))),
    }
}

fn connect(state: &mut AppState, agent: &AgentInfo) {
    state.connection = Connection::Connected {
        agent_id: agent.id.clone(),
        agent_name: agent.name.clone(),
    };
    state.last_error = None;
    state.transcript.push(Utterance::connected_to(&agent.name));
}

fn fail_discovery(state: &mut AppState, reason: String) {
    state.last_error = Some(reason.clone());
    state.connection = Connection::Failed { reason };
}
