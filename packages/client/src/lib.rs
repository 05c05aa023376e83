//! Terminal client for the Huddle room chat server.

pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;

pub use runner::run_client;
