// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for the real-time chat connection.
//!
//! Each accepted connection gets a sender task forwarding bus payloads to
//! the socket and a read loop dispatching client events. The authenticated
//! user id is captured once at the handshake and passed by value into every
//! handler; there is no mutable per-connection session state to reassign.

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, warn};

use crewlink_chat::{messages, outbound_channel};
use crewlink_core::CrewlinkError;
use crewlink_core::time::now_rfc3339;
use crewlink_core::types::{Room, User};

use crate::auth::{self, WsAuthQuery};
use crate::events::{ClientEvent, ServerEvent};
use crate::server::GatewayState;

/// WebSocket upgrade handler.
///
/// Authentication happens here, before the upgrade: a handshake without a
/// decodable identity is refused outright and no event handler ever runs.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsAuthQuery>,
    headers: HeaderMap,
    State(state): State<GatewayState>,
) -> Response {
    let Some(user_id) = auth::authenticate(&headers, params.token.as_deref()) else {
        warn!("websocket handshake rejected: missing or undecodable token");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    // Record the identity so direct-message existence checks can see it.
    let user = User {
        id: user_id.clone(),
        display_name: None,
        created_at: now_rfc3339(),
    };
    if let Err(e) = state.store.upsert_user(&user).await {
        warn!(error = %e, user_id = %user_id, "failed to record user at handshake");
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

/// Handle an individual authenticated WebSocket connection.
///
/// Spawns a sender task forwarding bus payloads to the client and reads
/// client frames until close or network failure. On disconnect all
/// per-connection bookkeeping is released; nothing durable changes.
async fn handle_socket(socket: WebSocket, state: GatewayState, user_id: String) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let conn_id = uuid::Uuid::new_v4().to_string();

    let (tx, mut rx) = outbound_channel();
    state.bus.register(&conn_id, tx);

    let sender_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    debug!(conn_id = %conn_id, user_id = %user_id, "connection established");

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Text(text) => {
                let text_str: &str = &text;
                let event: ClientEvent = match serde_json::from_str(text_str) {
                    Ok(event) => event,
                    Err(e) => {
                        warn!(conn_id = %conn_id, "invalid client frame: {e}");
                        continue;
                    }
                };
                handle_event(&state, &conn_id, &user_id, event).await;
            }
            Message::Close(_) => break,
            _ => {} // Ignore binary; ping/pong handled by the protocol layer.
        }
    }

    state.bus.unregister(&conn_id);
    sender_task.abort();
    debug!(conn_id = %conn_id, user_id = %user_id, "connection closed");
}

/// Dispatch one client event. Operation failures surface as events scoped to
/// this connection; they never tear the connection down.
async fn handle_event(state: &GatewayState, conn_id: &str, user_id: &str, event: ClientEvent) {
    match event {
        ClientEvent::JoinCityRoom { city_code } => {
            match state.registry.resolve_city(&city_code).await {
                Ok(room) => join_and_replay(state, conn_id, &room).await,
                Err(e) => send_operation_error(state, conn_id, &e).await,
            }
        }
        ClientEvent::JoinDmRoom { other_user_id } => {
            match state.registry.resolve_dm(user_id, &other_user_id).await {
                Ok(room) => join_and_replay(state, conn_id, &room).await,
                Err(e) => send_operation_error(state, conn_id, &e).await,
            }
        }
        ClientEvent::JoinRoom { room_id } => {
            match state.registry.resolve_existing(&room_id, user_id).await {
                Ok(room) => join_and_replay(state, conn_id, &room).await,
                Err(e) => send_operation_error(state, conn_id, &e).await,
            }
        }
        ClientEvent::SendMessage { room_id, content } => {
            match messages::append(state.store.as_ref(), &room_id, user_id, &content).await {
                Ok(message) => {
                    // Everyone subscribed gets the broadcast, the sender
                    // included; the ack follows on the sender's connection.
                    if let Some(payload) =
                        encode(&ServerEvent::NewMessage { message: message.clone() })
                    {
                        state.bus.publish(&room_id, &payload).await;
                    }
                    send_event(state, conn_id, &ServerEvent::sent(message)).await;
                }
                Err(e) => send_operation_error(state, conn_id, &e).await,
            }
        }
        ClientEvent::SendAiMessage { topic_key, message } => {
            match state.concierge.handle(user_id, &topic_key, &message).await {
                Ok(content) => {
                    send_event(
                        state,
                        conn_id,
                        &ServerEvent::AiResponse {
                            content,
                            topic_key,
                        },
                    )
                    .await;
                }
                Err(e) => {
                    // Model backend failures never escape as connection
                    // errors; the user sees a fixed message and the
                    // connection stays usable.
                    send_event(
                        state,
                        conn_id,
                        &ServerEvent::AiError {
                            error: crewlink_concierge::user_message(&e).to_string(),
                        },
                    )
                    .await;
                }
            }
        }
        ClientEvent::ClearAiConversation { topic_key } => {
            state.concierge.clear(user_id, &topic_key);
            send_event(
                state,
                conn_id,
                &ServerEvent::AiConversationCleared { topic_key },
            )
            .await;
        }
    }
}

/// Subscribe the connection, ack the join, then replay history oldest-first
/// as its own event.
async fn join_and_replay(state: &GatewayState, conn_id: &str, room: &Room) {
    state.bus.join(conn_id, &room.id);
    send_event(state, conn_id, &ServerEvent::joined(&room.id)).await;

    match messages::history_oldest_first(state.store.as_ref(), &room.id, messages::HISTORY_LIMIT)
        .await
    {
        Ok(history) => {
            send_event(
                state,
                conn_id,
                &ServerEvent::MessageHistory {
                    room_id: room.id.clone(),
                    messages: history,
                },
            )
            .await;
        }
        Err(e) => send_operation_error(state, conn_id, &e).await,
    }
}

async fn send_operation_error(state: &GatewayState, conn_id: &str, err: &CrewlinkError) {
    debug!(conn_id = %conn_id, error = %err, "operation failed");
    send_event(
        state,
        conn_id,
        &ServerEvent::Error {
            error: err.to_string(),
        },
    )
    .await;
}

async fn send_event(state: &GatewayState, conn_id: &str, event: &ServerEvent) {
    if let Some(payload) = encode(event) {
        state.bus.send_to(conn_id, &payload).await;
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!("failed to encode server event: {e}");
            None
        }
    }
}
