//! Client configuration from the environment

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_LOG_FILTER: &str = "cowchat=info";

/// Configuration for the chat client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Agent service base URL, without trailing slash
    pub api_url: String,
    pub user_name: String,
    pub room_id: Option<String>,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("COWCHAT_API_URL").map_or_else(
            || DEFAULT_API_URL.to_string(),
            |url| url.trim_end_matches('/').to_string(),
        );

        let request_timeout = get("COWCHAT_TIMEOUT_SECS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let log_file = get("COWCHAT_LOG_FILE").map_or_else(
            || {
                let home = get("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.cowchat/cowchat.log"))
            },
            PathBuf::from,
        );

        Self {
            api_url,
            user_name: get("COWCHAT_USER_NAME").unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            room_id: get("COWCHAT_ROOM_ID"),
            request_timeout,
            log_file,
        }
    }
}
