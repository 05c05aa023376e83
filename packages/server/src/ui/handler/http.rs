//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Liveness text served at `/` when no frontend build is configured
pub async fn root() -> &'static str {
    "API is Running"
}

/// Health check endpoint with live connection counts
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let status = state.server_status_usecase.execute().await;
    Json(HealthDto {
        status: "ok".to_string(),
        connections: status.connections,
        joined: status.joined,
    })
}

/// Rooms with at least one member, ordered by name
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.list_rooms_usecase.execute().await;
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}
