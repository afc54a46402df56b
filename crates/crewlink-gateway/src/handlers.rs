// SPDX-FileCopyrightText: 2026 Crewlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the room management REST surface.
//!
//! Reads are unauthenticated; room creation requires a decodable bearer
//! identity, which also seeds the creator as the room's first participant.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crewlink_core::CrewlinkError;
use crewlink_core::types::Room;

use crate::auth;
use crate::server::GatewayState;

/// Request body for creating a named city room.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    /// Display name of the new room.
    pub name: String,
}

/// Response body for room listings.
#[derive(Debug, Serialize)]
pub struct RoomListResponse {
    pub rooms: Vec<Room>,
}

/// Response body for the room detail view.
#[derive(Debug, Serialize)]
pub struct RoomDetailResponse {
    pub room: Room,
    pub participants: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_public_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /v1/cities/{city}/rooms
///
/// Lists the city-group rooms for a city. Unauthenticated.
pub async fn list_city_rooms(
    State(state): State<GatewayState>,
    Path(city): Path<String>,
) -> Response {
    match state.registry.list_city_rooms(&city).await {
        Ok(rooms) => (StatusCode::OK, Json(RoomListResponse { rooms })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /v1/rooms/{id}
///
/// Fetches a room with its participants. Unauthenticated.
pub async fn get_room(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.registry.room_with_participants(&id).await {
        Ok((room, participants)) => {
            (StatusCode::OK, Json(RoomDetailResponse { room, participants })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// POST /v1/cities/{city}/rooms
///
/// Creates a new named city-group room with the caller as first participant.
/// Requires a decodable bearer identity; a reused name for the same city is
/// a conflict.
pub async fn create_city_room(
    State(state): State<GatewayState>,
    Path(city): Path<String>,
    headers: HeaderMap,
    Json(body): Json<CreateRoomRequest>,
) -> Response {
    let Some(creator_id) = auth::authenticate(&headers, None) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "authentication required to create a room".to_string(),
            }),
        )
            .into_response();
    };

    match state
        .registry
        .create_city_room(&city, &body.name, &creator_id)
        .await
    {
        Ok(room) => {
            debug!(room_id = %room.id, creator = %creator_id, "city room created");
            (StatusCode::CREATED, Json(room)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &CrewlinkError) -> Response {
    let status = match err {
        CrewlinkError::NotFound { .. } => StatusCode::NOT_FOUND,
        CrewlinkError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CrewlinkError::Conflict(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_room_request_deserializes() {
        let req: CreateRoomRequest =
            serde_json::from_str(r#"{"name": "Night Owls"}"#).unwrap();
        assert_eq!(req.name, "Night Owls");
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"version\":\"0.1.0\""));
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "something went wrong".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("something went wrong"));
    }
}
