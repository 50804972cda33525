//! Read-only view of the application state for rendering

use super::state::{AppState, Connection, Role, Utterance};
use crate::agent_api::AgentInfo;

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub transcript: Vec<String>,
    pub prompt: Prompt,
    pub selection: Option<Selection>,
    /// Text for the talking head
    pub headline: String,
    pub agent_name: Option<String>,
}

/// The compose line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub pending: bool,
    pub buffer: String,
}

impl Prompt {
    pub fn render(&self) -> String {
        if self.pending {
            format!("Waiting for response... {}", self.buffer)
        } else {
            format!("Your message: {}_", self.buffer)
        }
    }
}

/// Candidate list shown while picking an agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub candidates: Vec<AgentInfo>,
    pub cursor: usize,
}

impl Selection {
    /// One line per candidate, the highlighted one marked with `>`
    pub fn lines(&self) -> Vec<String> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                let marker = if i == self.cursor { ">" } else { " " };
                format!("{marker} {} ({})", agent.name, agent.status)
            })
            .collect()
    }
}

impl From<&AppState> for Snapshot {
    fn from(state: &AppState) -> Self {
        let selection = match &state.connection {
            Connection::Selecting { candidates, cursor } => Some(Selection {
                candidates: candidates.clone(),
                cursor: *cursor,
            }),
            _ => None,
        };

        let agent_name = match &state.connection {
            Connection::Connected { agent_name, .. } => Some(agent_name.clone()),
            _ => None,
        };

        Snapshot {
            transcript: state.transcript.entries().iter().map(transcript_line).collect(),
            prompt: Prompt {
                pending: state.is_pending(),
                buffer: state.compose.clone(),
            },
            selection,
            headline: headline(state),
            agent_name,
        }
    }
}

fn transcript_line(utterance: &Utterance) -> String {
    match utterance.role {
        Role::User => format!("You: {}", utterance.text),
        Role::Agent => format!("Agent: {}", utterance.text),
        Role::System => utterance.text.clone(),
    }
}

/// Error first, then activity, then the latest thing the agent said
fn headline(state: &AppState) -> String {
    if let Some(error) = &state.last_error {
        return format!("Error: {error}");
    }
    if state.is_pending() {
        return "Loading...".to_string();
    }
    if !state.connection.is_connected() {
        return "Connecting to agent service...".to_string();
    }
    if state.transcript.is_empty() {
        return "Ready to chat!".to_string();
    }
    state
        .transcript
        .last_agent()
        .map_or_else(|| "Waiting for first response...".to_string(), |u| u.text.clone())
}
