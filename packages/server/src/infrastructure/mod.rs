//! Infrastructure layer: concrete implementations of the domain interfaces.

pub mod color;
pub mod dto;
pub mod repository;
pub mod transport;
