//! Agent service error types

use thiserror::Error;

/// Agent service error with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// Raw response body, kept for unexpected status codes
    pub body: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            body: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn protocol(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Protocol { status },
            message: message.into(),
            body: Some(body.into()),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn no_active_agents() -> Self {
        Self::new(ApiErrorKind::NoActiveAgents, "no active agents found")
    }
}

/// Error classification
///
/// None of these end the process; the state machine turns them into a
/// displayed error and stays interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection refused, timeout, body read failure
    Transport,
    /// Unexpected HTTP status
    Protocol { status: u16 },
    /// Response body did not match the expected shape
    Decode,
    /// Directory lookup returned no agent with status `active`
    NoActiveAgents,
}

impl ApiErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Protocol { .. } => "protocol",
            Self::Decode => "decode",
            Self::NoActiveAgents => "no_active_agents",
        }
    }
}
