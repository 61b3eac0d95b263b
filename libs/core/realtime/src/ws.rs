//! `/ws` endpoint: clients join rooms and receive the events published to them.

use std::collections::HashSet;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use axum_helpers::auth::{JwtAuth, Role};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::broadcaster::{ADMIN_DASHBOARD_ROOM, Broadcaster, product_room};

/// Frames a client may send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "event",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    SubscribeProductStock { product_id: Uuid },
    SubscribeAdminDashboard { token: String },
    Unsubscribe { room: String },
}

/// Rooms one socket may be in at once.
pub const MAX_ROOMS_PER_SOCKET: usize = 64;

/// Rooms joined by one socket.
#[derive(Debug, Default)]
pub struct Subscriptions {
    rooms: HashSet<String>,
}

impl Subscriptions {
    pub fn contains(&self, room: &str) -> bool {
        self.rooms.contains(room)
    }

    /// Apply one client text frame and return the reply frame.
    pub fn handle_text(&mut self, text: &str, auth: &JwtAuth) -> Value {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => self.apply(message, auth),
            Err(e) => {
                debug!(error = %e, "Unrecognised socket frame");
                error_frame("Unrecognised message")
            }
        }
    }

    pub fn apply(&mut self, message: ClientMessage, auth: &JwtAuth) -> Value {
        match message {
            ClientMessage::SubscribeProductStock { product_id } => {
                self.join(product_room(product_id))
            }
            ClientMessage::SubscribeAdminDashboard { token } => match auth.verify(&token) {
                Ok(claims) if claims.role == Role::Admin => {
                    self.join(ADMIN_DASHBOARD_ROOM.to_string())
                }
                Ok(_) => error_frame("Admins only"),
                Err(e) => {
                    debug!(error = %e, "Dashboard subscription with bad token");
                    error_frame("Invalid token")
                }
            },
            ClientMessage::Unsubscribe { room } => {
                self.rooms.remove(&room);
                json!({ "event": "unsubscribed", "room": room })
            }
        }
    }

    fn join(&mut self, room: String) -> Value {
        if self.rooms.len() >= MAX_ROOMS_PER_SOCKET && !self.rooms.contains(&room) {
            debug!(%room, "Room limit reached");
            return error_frame("Too many subscriptions");
        }
        let frame = json!({ "event": "subscribed", "room": room });
        self.rooms.insert(room);
        frame
    }
}

fn error_frame(message: &str) -> Value {
    json!({ "event": "error", "data": { "message": message } })
}

#[derive(Clone)]
struct WsState {
    broadcaster: Broadcaster,
    auth: JwtAuth,
}

/// Router serving `GET /ws`.
pub fn router(broadcaster: Broadcaster, auth: JwtAuth) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(WsState { broadcaster, auth })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WsState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: WsState) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.broadcaster.subscribe();
    let mut subscriptions = Subscriptions::default();

    info!("Socket connected");

    loop {
        tokio::select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let reply = subscriptions.handle_text(text.as_str(), &state.auth);
                    if sender.send(Message::Text(reply.to_string().into())).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(error = %e, "Socket read failed");
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(event) if subscriptions.contains(&event.room) => {
                    if sender.send(Message::Text(event.to_frame().into())).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Socket lagging, events skipped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    info!("Socket disconnected");
}
