//! WebSocket handler pushing change notifications to browsers.
//!
//! The channel is one-way: every persisted mutation produces a single
//! `{"event":"update"}` text frame, after which clients re-fetch the
//! inventory. Incoming frames other than ping and close are ignored.

use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use shared_bus::EventStream;
use tracing::{debug, info};
use uuid::Uuid;

/// `GET /ws`
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    // Subscribe before the handshake completes so no change is missed.
    let updates = state.bus.event_stream();
    ws.on_upgrade(move |socket| UpdateChannel::new(updates).run(socket))
}

/// One connected observer
pub struct UpdateChannel {
    connection_id: Uuid,
    updates: EventStream,
}

impl UpdateChannel {
    pub fn new(updates: EventStream) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            updates,
        }
    }

    /// Forward bus events until either side goes away.
    pub async fn run(mut self, socket: WebSocket) {
        info!(connection_id = %self.connection_id, "Observer connected");
        let (mut sender, mut receiver) = socket.split();

        loop {
            tokio::select! {
                event = self.updates.next() => {
                    let Some(event) = event else { break };
                    if let Err(e) = sender.send(Message::Text(event.to_frame())).await {
                        debug!(connection_id = %self.connection_id, error = %e, "Push failed");
                        break;
                    }
                }
                incoming = receiver.next() => match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if sender.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(connection_id = %self.connection_id, error = %e, "Socket error");
                        break;
                    }
                },
            }
        }

        info!(connection_id = %self.connection_id, "Observer disconnected");
    }
}
