//! Room chat server library.
//!
//! Clients connect over WebSocket, join a named room and exchange chat events
//! that are fanned out to every member of the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
