//! HTTP implementation of the agent service

use super::types::{AgentsResponse, MessageRequest, MessageResponse};
use super::{AgentInfo, AgentService, ApiError, Discovery, Reply, SessionIdentity};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Agent service reached over HTTP/JSON
///
/// Holds no conversation state; one instance can serve every call.
pub struct HttpAgentClient {
    client: Client,
    base_url: String,
    room_id: Option<String>,
}

impl HttpAgentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            room_id: None,
        })
    }

    /// Send every message into this room
    pub fn with_room(mut self, room_id: Option<String>) -> Self {
        self.room_id = room_id;
        self
    }

    fn agents_url(&self) -> String {
        format!("{}/agents", self.base_url)
    }

    fn message_url(&self, agent_id: &str) -> String {
        format!("{}/agents/{}/message", self.base_url, agent_id)
    }

    /// Fetch the raw directory, unfiltered
    pub async fn list_agents(&self) -> Result<Vec<AgentInfo>, ApiError> {
        let response = self
            .client
            .get(self.agents_url())
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("failed to connect to agent service: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("failed to read response: {e}")))?;

        if status != StatusCode::OK {
            return Err(ApiError::protocol(
                status.as_u16(),
                format!("API returned status {}", status.as_u16()),
                body,
            ));
        }

        let parsed: AgentsResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("failed to decode response: {e}")))?;

        Ok(parsed.data.agents.into_iter().map(AgentInfo::from).collect())
    }
}

#[async_trait]
impl AgentService for HttpAgentClient {
    async fn discover(&self) -> Result<Discovery, ApiError> {
        let agents = self.list_agents().await?;
        Discovery::from_agents(agents)
    }

    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        identity: &SessionIdentity,
    ) -> Result<Reply, ApiError> {
        let request = MessageRequest::new(text, identity, self.room_id.as_deref());

        let response = self
            .client
            .post(self.message_url(agent_id))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("failed to send message: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("failed to read response: {e}")))?;

        if status != StatusCode::CREATED {
            return Err(ApiError::protocol(
                status.as_u16(),
                format!("API error (status {}): {}", status.as_u16(), body),
                body,
            ));
        }

        let parsed: MessageResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("failed to decode response: {e}")))?;

        Ok(Reply::from(parsed))
    }
}
