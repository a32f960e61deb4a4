//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{error::ClientError, session::run_client_session, ui::prompt};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 2;

/// When and how often to retry a lost connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RECONNECT_ATTEMPTS,
            interval: Duration::from_secs(RECONNECT_INTERVAL_SECS),
        }
    }
}

impl ReconnectPolicy {
    /// Delay before the next attempt, or `None` once `failures` consecutive
    /// attempts have failed
    pub fn next_delay(&self, failures: u32) -> Option<Duration> {
        (failures < self.max_attempts).then_some(self.interval)
    }
}

/// Run the client until the user exits or reconnecting gives up
pub async fn run_client(
    url: String,
    username: String,
    policy: ReconnectPolicy,
) -> Result<(), ClientError> {
    // The line editor outlives individual connections
    let mut input_rx = spawn_line_reader(prompt(&username));
    let mut failures = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            username,
            failures + 1,
            policy.max_attempts
        );

        match run_client_session(&url, &username, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                // A connection that worked resets the budget
                failures = if e.was_connected() { 1 } else { failures + 1 };

                if input_rx.is_closed() {
                    return Ok(());
                }

                let Some(delay) = policy.next_delay(failures) else {
                    return Err(ClientError::ReconnectExhausted(policy.max_attempts));
                };

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    delay.as_secs(),
                    failures + 1,
                    policy.max_attempts
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Read lines with rustyline on a dedicated thread.
///
/// The channel closes on Ctrl+C, Ctrl+D or a terminal error.
fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
