//! cowchat - terminal chat client for remote conversational agents
//!
//! Discovers agents over HTTP, lets the user pick one, and exchanges
//! messages with it while a robot repeats the latest reply.

mod agent_api;
mod config;
mod runtime;
mod state_machine;
mod tui;

use agent_api::{HttpAgentClient, LoggingService, SessionIdentity};
use config::{ChatConfig, DEFAULT_LOG_FILTER};
use runtime::{event_channel, ChatRuntime};
use state_machine::AppState;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui::TerminalPresenter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration
    let config = ChatConfig::from_env();

    // Initialize logging; the terminal belongs to the UI, so logs go to a file
    let fallback_log_file = std::env::temp_dir().join("cowchat.log");
    let (log_sink, log_failures) = open_log_sink(&[config.log_file.clone(), fallback_log_file]);
    let log_writer = match &log_sink {
        LogSink::File { file, .. } => BoxMakeWriter::new(Arc::clone(file)),
        LogSink::Discard => BoxMakeWriter::new(io::sink),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(log_writer),
        )
        .init();

    for (path, error) in &log_failures {
        tracing::warn!(path = %path.display(), error = %error, "Log file unavailable");
    }
    if let LogSink::File { path, .. } = &log_sink {
        tracing::debug!(path = %path.display(), "Logging to file");
    }

    // Session identity lives for the whole process
    let identity = SessionIdentity::generate(config.user_name.clone());
    tracing::info!(
        api_url = %config.api_url,
        user_id = %identity.user_id,
        user_name = %identity.user_name,
        "Starting cowchat"
    );

    let client = HttpAgentClient::new(&config.api_url, config.request_timeout)?
        .with_room(config.room_id.clone());
    let service = LoggingService::new(client);

    let (event_tx, event_rx) = event_channel();
    let presenter = TerminalPresenter::new()?;
    spawn_input_reader_or_quit(event_tx.clone());

    let runtime = ChatRuntime::new(
        AppState::new(identity),
        service,
        presenter,
        event_rx,
        event_tx,
    );

    // Runtime drops the presenter on return, which restores the terminal
    let result = runtime.run().await;
    match result {
        Ok(state) => {
            tracing::info!(transcript_len = state.transcript.len(), "Session ended");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat runtime failed");
            Err(e.into())
        }
    }
}

/// Start the input thread; without it the session cannot be driven or ended
fn spawn_input_reader_or_quit(event_tx: tokio::sync::mpsc::Sender<state_machine::Event>) {
    if let Err(e) = tui::spawn_input_reader(event_tx.clone()) {
        tracing::error!(error = %e, "Failed to start input reader");
        let _ = event_tx.try_send(state_machine::Event::Quit);
    }
}

/// Where log output ends up
enum LogSink {
    File { path: PathBuf, file: Arc<File> },
    /// No candidate could be opened; logs are dropped
    Discard,
}

/// Open the log file for appending, creating its directory if needed
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// First candidate that opens wins; failures are returned for logging once
/// the subscriber is installed
fn open_log_sink(candidates: &[PathBuf]) -> (LogSink, Vec<(PathBuf, io::Error)>) {
    let mut failures = Vec::new();
    for path in candidates {
        match open_log_file(path) {
            Ok(file) => {
                let sink = LogSink::File {
                    path: path.clone(),
                    file: Arc::new(file),
                };
                return (sink, failures);
            }
            Err(e) => failures.push((path.clone(), e)),
        }
    }
    (LogSink::Discard, failures)
}
