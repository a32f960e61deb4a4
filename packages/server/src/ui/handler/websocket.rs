//! WebSocket connection handlers.
//!
//! Each connection runs two loops:
//! - the read loop (inline) decodes frames and drives the session,
//! - the pusher loop (spawned) drains the session's outbound channel.
//!
//! When either loop ends the other is stopped and the session is released.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{
    sync::mpsc,
    task::{AbortHandle, JoinHandle},
};

use crate::{
    domain::{OutboundEvent, PusherChannel, Session, SessionId},
    infrastructure::dto::websocket::{ClientMessage, InboundError, ServerMessage},
    ui::state::AppState,
    usecase::{DisconnectSessionUseCase, HandleCommandUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Releases the session on every exit path, including task cancellation.
struct SessionGuard {
    session: Session,
    disconnect: Arc<DisconnectSessionUseCase>,
    pusher: AbortHandle,
}

impl SessionGuard {
    fn new(
        session: Session,
        disconnect: Arc<DisconnectSessionUseCase>,
        pusher: AbortHandle,
    ) -> Self {
        Self {
            session,
            disconnect,
            pusher,
        }
    }

    fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Close the session and start its cleanup on a separate task.
    ///
    /// Returns `None` when the session was already closed.
    fn spawn_cleanup(&mut self) -> Option<JoinHandle<()>> {
        self.pusher.abort();

        let previous = self.session.close()?;
        let id = self.session.id();
        let disconnect = self.disconnect.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => Some(handle.spawn(async move {
                disconnect.release(id, previous).await;
            })),
            Err(_) => {
                tracing::warn!("No runtime available to release session '{}'", id);
                None
            }
        }
    }

    /// Release the session and wait for the cleanup to finish.
    ///
    /// Cancelling the caller does not interrupt the cleanup task.
    async fn release(mut self) {
        if let Some(cleanup) = self.spawn_cleanup()
            && let Err(e) = cleanup.await
        {
            tracing::warn!("Cleanup of session '{}' failed: {}", self.session.id(), e);
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        // Only has work left when the connection task was cancelled before release.
        self.spawn_cleanup();
    }
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// Events are encoded and written one at a time, so each client sees them
/// in the order they were queued.
///
/// # Arguments
///
/// * `rx` - Channel receiver for this session's outbound events
/// * `sender` - WebSocket sink to send frames to this client
/// * `id` - Session ID (for logging)
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<OutboundEvent>,
    mut sender: SplitSink<WebSocket, Message>,
    id: SessionId,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match ServerMessage::from(event).to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode frame for '{}': {}", id, e);
                    continue;
                }
            };

            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::debug!("Failed to write to '{}': {}", id, e);
                break;
            }
        }
    })
}

/// Reads frames until the client closes, errors, or sends something undecodable.
async fn read_loop(
    receiver: &mut SplitStream<WebSocket>,
    session: &mut Session,
    sender: &PusherChannel,
    usecase: &HandleCommandUseCase,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", session.id(), e);
                break;
            }
        };

        let decoded = match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", session.id(), text.as_str());
                ClientMessage::from_json(text.as_str())
            }
            Message::Binary(_) => Err(InboundError::BinaryFrame),
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
                continue;
            }
            Message::Close(_) => {
                tracing::debug!("Session '{}' requested close", session.id());
                break;
            }
        };

        match decoded {
            Ok(client_msg) => {
                usecase.execute(session, sender, client_msg.into()).await;
            }
            Err(e) => {
                tracing::warn!("Terminating session '{}': {}", session.id(), e);
                break;
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session = state.connect_session_usecase.execute();
    let id = session.id();
    tracing::info!("Session '{}' connected", id);

    // Create a channel for this session to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let (sender, mut receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender, id);
    let mut guard = SessionGuard::new(
        session,
        state.disconnect_session_usecase.clone(),
        send_task.abort_handle(),
    );

    // If any one of the loops completes, stop the other
    tokio::select! {
        _ = read_loop(&mut receiver, guard.session_mut(), &tx, &state.handle_command_usecase) => {},
        _ = &mut send_task => {
            tracing::debug!("Pusher for '{}' stopped", id);
        },
    };

    guard.release().await;
    tracing::info!("Session '{}' closed", id);
}
