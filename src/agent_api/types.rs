//! Types for the agent service: wire payloads and domain values

use super::ApiError;
use serde::{Deserialize, Serialize};

/// Status string marking an agent as available for chat
pub const ACTIVE_STATUS: &str = "active";

/// Value sent in the `source` field of every outgoing message
pub const MESSAGE_SOURCE: &str = "cowchat";

// ============================================================================
// Domain Types
// ============================================================================

/// An agent known to the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl AgentInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// Outcome of a successful directory lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// Exactly one active agent; connect to it directly
    Single(AgentInfo),
    /// Several active agents, in directory order; the user picks one
    Multiple(Vec<AgentInfo>),
}

impl Discovery {
    /// Keep only `active` agents and decide between auto-connect and selection.
    pub fn from_agents(agents: Vec<AgentInfo>) -> Result<Self, ApiError> {
        let mut active: Vec<AgentInfo> = agents.into_iter().filter(AgentInfo::is_active).collect();
        match active.len() {
            0 => Err(ApiError::no_active_agents()),
            1 => Ok(Discovery::Single(active.remove(0))),
            _ => Ok(Discovery::Multiple(active)),
        }
    }
}

/// Who this client is, for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub user_name: String,
}

impl SessionIdentity {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }

    /// Fresh identity with a random v4 user id
    pub fn generate(user_name: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), user_name)
    }
}

/// The agent's answer to one message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub text: String,
    pub message_id: String,
    pub agent_name: String,
    pub room_id: String,
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct AgentsResponse {
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
    pub data: AgentsData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentsData {
    pub agents: Vec<AgentRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentRecord {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl From<AgentRecord> for AgentInfo {
    fn from(record: AgentRecord) -> Self {
        AgentInfo::new(record.id, record.name, record.status)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageRequest<'a> {
    pub text: &'a str,
    pub sender_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<&'a str>,
    pub source: &'a str,
    pub entity_id: &'a str,
    pub user_name: &'a str,
}

impl<'a> MessageRequest<'a> {
    pub fn new(text: &'a str, identity: &'a SessionIdentity, room_id: Option<&'a str>) -> Self {
        Self {
            text,
            sender_id: &identity.user_id,
            room_id,
            source: MESSAGE_SOURCE,
            entity_id: &identity.user_id,
            user_name: &identity.user_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
    pub data: MessageData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageData {
    pub message: MessageText,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room_id: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageText {
    pub text: String,
}

impl From<MessageResponse> for Reply {
    fn from(resp: MessageResponse) -> Self {
        Reply {
            text: resp.data.message.text,
            message_id: resp.data.message_id,
            agent_name: resp.data.name,
            room_id: resp.data.room_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent_api::ApiErrorKind;
    use serde_json::json;

    #[test]
    fn test_single_active_among_many_connects_directly() {
        let discovery = Discovery::from_agents(vec![
            AgentInfo::new("a1", "Aria", "active"),
            AgentInfo::new("a2", "Bo", "inactive"),
        ])
        .unwrap();
        assert_eq!(discovery, Discovery::Single(AgentInfo::new("a1", "Aria", "active")));
    }

    #[test]
    fn test_multiple_active_keeps_order() {
        let discovery = Discovery::from_agents(vec![
            AgentInfo::new("a1", "Aria", "active"),
            AgentInfo::new("a3", "Cy", "stopped"),
            AgentInfo::new("a2", "Bo", "active"),
        ])
        .unwrap();
        let Discovery::Multiple(agents) = discovery else {
            panic!("expected selection list");
        };
        let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn test_status_match_is_exact() {
        let err = Discovery::from_agents(vec![
            AgentInfo::new("a1", "Aria", "Active"),
            AgentInfo::new("a2", "Bo", "active "),
        ])
        .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NoActiveAgents);
    }

    #[test]
    fn test_empty_directory_is_failure() {
        let err = Discovery::from_agents(vec![]).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::NoActiveAgents);
    }

    #[test]
    fn test_message_request_wire_shape() {
        let identity = SessionIdentity::new("u-1", "User");
        let body = serde_json::to_value(MessageRequest::new("hi", &identity, None)).unwrap();
        assert_eq!(
            body,
            json!({
                "text": "hi",
                "senderId": "u-1",
                "source": "cowchat",
                "entityId": "u-1",
                "userName": "User"
            })
        );

        let body = serde_json::to_value(MessageRequest::new("hi", &identity, Some("r-9"))).unwrap();
        assert_eq!(body["roomId"], "r-9");
    }

    #[test]
    fn test_message_response_parses() {
        let resp: MessageResponse = serde_json::from_value(json!({
            "success": true,
            "data": {
                "message": { "text": "hello there" },
                "messageId": "m-1",
                "name": "Aria",
                "roomId": "r-1",
                "source": "direct"
            }
        }))
        .unwrap();
        let reply = Reply::from(resp);
        assert_eq!(reply.text, "hello there");
        assert_eq!(reply.message_id, "m-1");
        assert_eq!(reply.agent_name, "Aria");
        assert_eq!(reply.room_id, "r-1");
    }

    #[test]
    fn test_generated_identity_is_uuid() {
        let identity = SessionIdentity::generate("User");
        assert!(uuid::Uuid::parse_str(&identity.user_id).is_ok());
        assert_eq!(identity.user_name, "User");
    }
}
