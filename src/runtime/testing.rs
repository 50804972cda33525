//! Mock implementations for testing
//!
//! These mocks enable runtime tests without a network or a terminal.

use super::traits::Presenter;
use crate::agent_api::{AgentService, ApiError, Discovery, Reply, SessionIdentity};
use crate::state_machine::Snapshot;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Agent Service
// ============================================================================

/// Mock agent service that returns queued results
pub struct MockAgentService {
    discoveries: Mutex<VecDeque<Result<Discovery, ApiError>>>,
    replies: Mutex<VecDeque<Result<Reply, ApiError>>>,
    reply_delay: Option<Duration>,
    /// Record of (agent id, text, user id) for every send
    pub sends: Mutex<Vec<(String, String, String)>>,
}

impl MockAgentService {
    pub fn new() -> Self {
        Self {
            discoveries: Mutex::new(VecDeque::new()),
            replies: Mutex::new(VecDeque::new()),
            reply_delay: None,
            sends: Mutex::new(Vec::new()),
        }
    }

    /// Hold every reply for `delay` before returning it
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = Some(delay);
        self
    }

    pub fn queue_discovery(&self, result: Result<Discovery, ApiError>) {
        self.discoveries.lock().unwrap().push_back(result);
    }

    pub fn queue_reply(&self, result: Result<Reply, ApiError>) {
        self.replies.lock().unwrap().push_back(result);
    }

    pub fn recorded_sends(&self) -> Vec<(String, String, String)> {
        self.sends.lock().unwrap().clone()
    }
}

impl Default for MockAgentService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentService for MockAgentService {
    async fn discover(&self) -> Result<Discovery, ApiError> {
        self.discoveries
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("No mock discovery queued")))
    }

    async fn send_message(
        &self,
        agent_id: &str,
        text: &str,
        identity: &SessionIdentity,
    ) -> Result<Reply, ApiError> {
        self.sends.lock().unwrap().push((
            agent_id.to_string(),
            text.to_string(),
            identity.user_id.clone(),
        ));
        if let Some(delay) = self.reply_delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("No mock reply queued")))
    }
}

// ============================================================================
// Recording Presenter
// ============================================================================

/// Presenter that keeps every frame it is asked to draw
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    frames: Arc<Mutex<Vec<Snapshot>>>,
    notify: Arc<Notify>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Snapshot> {
        self.frames.lock().unwrap().clone()
    }

    /// Resolve once any recorded frame satisfies `predicate`
    pub async fn wait_for(&self, predicate: impl Fn(&Snapshot) -> bool) {
        loop {
            let notified = self.notify.notified();
            if self.frames.lock().unwrap().iter().any(&predicate) {
                return;
            }
            notified.await;
        }
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), String> {
        self.frames.lock().unwrap().push(snapshot.clone());
        self.notify.notify_waiters();
        Ok(())
    }
}
