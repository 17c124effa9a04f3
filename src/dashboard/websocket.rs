//! WebSocket handler for real-time dashboard updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::api::AppState;
use crate::page::PageUpdate;

/// Handles WebSocket upgrade requests for dashboard real-time updates
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serialize one update for the wire.
pub fn encode_update(update: &PageUpdate) -> Option<String> {
    match serde_json::to_string(update) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize page update: {}", e);
            None
        }
    }
}

/// Handles an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.page.subscribe();

    metrics::gauge!("opsboard_ws_clients").increment(1.0);
    tracing::debug!("Dashboard client connected");

    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(update) => {
                    let Some(json) = encode_update(&update) else {
                        continue;
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // The browser re-reads /fragments when it sees this.
                    tracing::warn!(skipped, "Dashboard client lagging, requesting resync");
                    let resync = r#"{"kind":"resync"}"#.to_string();
                    if sender.send(Message::Text(resync)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Handle incoming messages (ping/pong, close)
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    metrics::gauge!("opsboard_ws_clients").decrement(1.0);
    tracing::debug!("Dashboard client disconnected");
}
