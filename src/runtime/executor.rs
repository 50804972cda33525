//! Chat runtime executor

use super::traits::Presenter;
use crate::agent_api::AgentService;
use crate::state_machine::{startup_effect, transition, AppState, Effect, Event, Snapshot};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Whether the loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Owns the application state and drives it from one event queue
///
/// Terminal input and network results arrive through the same channel, so
/// state is only ever touched from the task running [`ChatRuntime::run`].
pub struct ChatRuntime<S, P>
where
    S: AgentService + 'static,
    P: Presenter,
{
    state: AppState,
    service: Arc<S>,
    presenter: P,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
}

impl<S, P> ChatRuntime<S, P>
where
    S: AgentService + 'static,
    P: Presenter,
{
    pub fn new(
        state: AppState,
        service: S,
        presenter: P,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            state,
            service: Arc::new(service),
            presenter,
            event_rx,
            event_tx,
        }
    }

    /// Run until a quit event; returns the final state
    pub async fn run(mut self) -> Result<AppState, String> {
        tracing::info!(user_id = %self.state.identity.user_id, "Starting chat runtime");

        self.render()?;
        if let Some(effect) = startup_effect(&self.state) {
            self.execute_effect(effect);
        }

        while let Some(event) = self.event_rx.recv().await {
            let flow = self.process_event(event);
            self.render()?;
            if flow == Flow::Quit {
                break;
            }
        }

        tracing::info!(
            connection = self.state.connection.name(),
            transcript_len = self.state.transcript.len(),
            "Chat runtime stopped"
        );
        Ok(self.state)
    }

    fn process_event(&mut self, event: Event) -> Flow {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                // Rejected input is dropped silently; the state stays as it was
                tracing::debug!(error = %e, state = self.state.connection.name(), "Event ignored");
                return Flow::Continue;
            }
        };

        let was_failed = self.state.connection.failure_reason().is_some();
        self.state = result.new_state;
        if let (false, Some(reason)) = (was_failed, self.state.connection.failure_reason()) {
            tracing::warn!(reason = %reason, "Agent discovery failed, no retry");
        }

        match result.effect {
            Some(effect) => self.execute_effect(effect),
            None => Flow::Continue,
        }
    }

    fn render(&mut self) -> Result<(), String> {
        let snapshot = Snapshot::from(&self.state);
        self.presenter.render(&snapshot)
    }

    /// Execute an effect; network work runs in the background and reports
    /// back through the event queue
    fn execute_effect(&mut self, effect: Effect) -> Flow {
        tracing::debug!(background = effect.is_async(), "Executing effect");
        match effect {
            Effect::Quit => {
                tracing::info!("Quit requested");
                Flow::Quit
            }

            Effect::DiscoverAgents => {
                let service = self.service.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    tracing::info!("Discovering agents (background)");
                    let event = Event::from_discovery(service.discover().await);
                    let _ = event_tx.send(event).await;
                });

                Flow::Continue
            }

            Effect::SendMessage {
                agent_id,
                text,
                identity,
            } => {
                let service = self.service.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    tracing::info!(agent_id = %agent_id, "Sending message (background)");
                    let result = service.send_message(&agent_id, &text, &identity).await;
                    let _ = event_tx.send(Event::from_reply(result)).await;
                });

                Flow::Continue
            }
        }
    }
}
