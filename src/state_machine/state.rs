//! Application state types

use crate::agent_api::{AgentInfo, SessionIdentity};

// ============================================================================
// Transcript
// ============================================================================

/// Who said an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
    System,
}

/// One transcript entry; never modified after it is appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub role: Role,
    pub text: String,
}

impl Utterance {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn connected_to(agent_name: &str) -> Self {
        Self::system(format!("Connected to agent: {agent_name}"))
    }
}

/// Append-only, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Utterance>,
}

impl Transcript {
    pub fn push(&mut self, utterance: Utterance) {
        self.entries.push(utterance);
    }

    pub fn entries(&self) -> &[Utterance] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent agent utterance, if any
    pub fn last_agent(&self) -> Option<&Utterance> {
        self.entries.iter().rev().find(|u| u.role == Role::Agent)
    }
}

// ============================================================================
// Connection
// ============================================================================

/// Connection phase; exactly one holds at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// Directory lookup in flight
    Discovering,

    /// Several active agents; waiting for the user to pick one
    Selecting {
        /// Never empty
        candidates: Vec<AgentInfo>,
        /// Always within `0..candidates.len()`
        cursor: usize,
    },

    /// Chatting with one agent
    Connected { agent_id: String, agent_name: String },

    /// Discovery failed; no retry is offered
    Failed { reason: String },
}

impl Connection {
    pub fn is_connected(&self) -> bool {
        matches!(self, Connection::Connected { .. })
    }

    /// Why discovery gave up, once in `Failed`
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Connection::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Connection::Discovering => "discovering",
            Connection::Selecting { .. } => "selecting",
            Connection::Connected { .. } => "connected",
            Connection::Failed { .. } => "failed",
        }
    }
}

/// The single outstanding network operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Discovery,
    /// Message send; keeps the submitted text so a failure can hand it back
    Send { text: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Everything the client knows; replaced wholesale on every transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub transcript: Transcript,
    pub compose: String,
    pub connection: Connection,
    pub pending: Option<Pending>,
    pub last_error: Option<String>,
    pub identity: SessionIdentity,
}

impl AppState {
    /// Startup state: discovery already counts as in flight
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            transcript: Transcript::default(),
            compose: String::new(),
            connection: Connection::Discovering,
            pending: Some(Pending::Discovery),
            last_error: None,
            identity,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
