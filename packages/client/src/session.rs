//! One WebSocket connection: join, then relay stdin lines and print server frames.

use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::MessageFormatter, ui::print_above_prompt};

fn encode(msg: &ClientMessage) -> Result<Message, ClientError> {
    Ok(Message::text(serde_json::to_string(msg)?))
}

/// Run the WebSocket client session
///
/// Returns `Ok(())` when the user closes the input, and an error when the
/// connection fails or is lost.
pub async fn run_client_session(
    url: &str,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url).await?;
    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();
    write
        .send(encode(&ClientMessage::Join {
            username: Some(username.to_string()),
        })?)
        .await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        username
    );

    // Spawn a task to handle incoming messages
    let me = username.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let output = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(msg) => MessageFormatter::format(&msg, &me),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print_above_prompt(&output, &me);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let frame = encode(&ClientMessage::Message { text: line })?;
            write.send(frame).await?;
        }
        Ok::<(), ClientError>(())
    };

    // If any one side completes, stop the other
    let result = tokio::select! {
        _ = &mut read_task => Err(ClientError::ConnectionLost),
        written = write_loop => written.map_err(|e| {
            tracing::debug!("Write side failed: {}", e);
            ClientError::ConnectionLost
        }),
    };
    read_task.abort();

    if result.is_ok() {
        // User exit: say goodbye politely
        write.close().await.ok();
    }
    result
}
