//! HTTP API response bodies.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Open WebSocket connections
    pub connections: usize,
    /// Connections that have joined a room
    pub joined: usize,
}

/// One entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub members: usize,
}
