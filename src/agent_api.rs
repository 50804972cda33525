//! Agent service abstraction
//!
//! Directory lookup and message exchange against the remote agent service.
//! Both calls are stateless request/response.

mod client;
mod error;
mod types;

pub use client::HttpAgentClient;
pub use error::{ApiError, ApiErrorKind};
pub use types::{AgentInfo, Discovery, Reply, SessionIdentity};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Common interface for the remote agent service
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Look up agents and pick the active one(s)
    async fn discover(&self) -> Result<Discovery, ApiError>;

    /// Send one utterance to an agent and wait for its reply
    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        identity: &SessionIdentity,
    ) -> Result<Reply, ApiError>;
}

#[async_trait]
impl<T: AgentService + ?Sized> AgentService for Arc<T> {
    async fn discover(&self) -> Result<Discovery, ApiError> {
        (**self).discover().await
    }

    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        identity: &SessionIdentity,
    ) -> Result<Reply, ApiError> {
        (**self).send_message(agent_id, text, identity).await
    }
}

/// Logging wrapper for agent services
pub struct LoggingService<S> {
    inner: S,
}

impl<S: AgentService> LoggingService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: AgentService> AgentService for LoggingService<S> {
    async fn discover(&self) -> Result<Discovery, ApiError> {
        let start = Instant::now();
        let result = self.inner.discover().await;
        let duration = start.elapsed();

        match &result {
            Ok(Discovery::Single(agent)) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    agent_id = %agent.id,
                    agent_name = %agent.name,
                    "Discovered single active agent"
                );
            }
            Ok(Discovery::Multiple(agents)) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    count = agents.len(),
                    "Discovered multiple active agents"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.label(),
                    body = e.body.as_deref().unwrap_or_default(),
                    "Agent discovery failed"
                );
            }
        }

        result
    }

    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        identity: &SessionIdentity,
    ) -> Result<Reply, ApiError> {
        let start = Instant::now();
        let result = self.inner.send_message(agent_id, text, identity).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    agent_id = %agent_id,
                    duration_ms = %duration.as_millis(),
                    message_id = %reply.message_id,
                    agent_name = %reply.agent_name,
                    room_id = %reply.room_id,
                    reply_len = reply.text.len(),
                    "Message exchange completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    agent_id = %agent_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.label(),
                    body = e.body.as_deref().unwrap_or_default(),
                    "Message exchange failed"
                );
            }
        }

        result
    }
}
