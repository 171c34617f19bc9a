//! WebSocket connection handlers.
//!
//! Each connection runs three tasks: a receive loop that reads frames and queues
//! their lines, a dispatch loop that handles queued lines one at a time, and a
//! pusher loop that forwards the connection's outbound channel to the socket.
//! When the receive or pusher loop ends, the connection goes through the same
//! unregister path right away, while the dispatch loop finishes on its own.

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
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, OUTBOUND_QUEUE_CAPACITY},
    ui::state::AppState,
    usecase::DispatchError,
};

/// Lines read from one connection that may wait for dispatch
const INBOUND_QUEUE_CAPACITY: usize = 32;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the channel closes or the socket rejects a write.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!("WebSocket send failed: {}", e);
                break;
            }
        }
    })
}

/// Turn an inbound frame into a text line.
///
/// Returns `None` for control frames. Binary frames that are not valid UTF-8 are
/// decoded lossily and handled as chat text.
fn frame_to_line(msg: Message) -> Option<String> {
    match msg {
        Message::Text(text) => Some(text.as_str().trim_end_matches(['\r', '\n']).to_string()),
        Message::Binary(bytes) => {
            let text = match std::str::from_utf8(&bytes) {
                Ok(text) => text.to_string(),
                Err(e) => {
                    tracing::warn!("Malformed binary frame, treating as chat text: {}", e);
                    String::from_utf8_lossy(&bytes).into_owned()
                }
            };
            Some(text.trim_end_matches(['\r', '\n']).to_string())
        }
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) => None,
    }
}

/// Dispatch one line and deliver the outcome
async fn handle_line(state: &AppState, connection_id: ConnectionId, line: &str) {
    match state.dispatch_command_usecase.execute(line).await {
        Ok(response) => {
            let delivered = state.registry.broadcast(&response).await;
            tracing::debug!(
                "Broadcasted response to '{}' ({} recipients)",
                line,
                delivered
            );
        }
        Err(DispatchError::Range(e)) => {
            tracing::info!("Rejected '{}' from '{}': {}", line, connection_id, e);
            state.registry.send_to(&connection_id, &e.to_string()).await;
        }
    }
}

/// Read frames and queue their lines for the dispatch loop.
///
/// Never waits on a command, so a close or a transport error is seen as soon as
/// it arrives.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    lines: mpsc::Sender<String>,
    connection_id: ConnectionId,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        if let Message::Close(_) = msg {
            tracing::info!("Connection '{}' requested close", connection_id);
            break;
        }
        let Some(line) = frame_to_line(msg) else {
            continue;
        };

        tracing::debug!("Received from '{}': {}", connection_id, line);
        if lines.send(line).await.is_err() {
            break;
        }
    }
}

/// Dispatch queued lines one at a time, in arrival order.
///
/// Ends once the receive loop is gone and the queue is drained. Lines received
/// before the connection closed still complete and reach the remaining members.
async fn dispatch_loop(
    mut lines: mpsc::Receiver<String>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    while let Some(line) = lines.recv().await {
        handle_line(&state, connection_id, &line).await;
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    let (line_tx, line_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);
    let (sender, receiver) = socket.split();

    let count = state.registry.register(connection_id, tx).await;
    tracing::info!(
        "Connection '{}' registered ({} connected)",
        connection_id,
        count
    );

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(receiver, line_tx, connection_id));
    // detached: outlives the connection until its queued lines are handled
    tokio::spawn(dispatch_loop(line_rx, state.clone(), connection_id));

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.registry.unregister(&connection_id).await {
        Some(remaining) => tracing::info!(
            "Connection '{}' closed ({} remaining)",
            connection_id,
            remaining
        ),
        None => tracing::info!("Connection '{}' closed", connection_id),
    }
}
