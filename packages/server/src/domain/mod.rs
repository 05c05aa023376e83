//! Domain layer for the room chat server.
//!
//! Value objects, entities and the interfaces (repository, transport, color
//! generation) that the use cases depend on. Concrete implementations live in
//! the infrastructure layer.

pub mod color;
pub mod entity;
pub mod error;
pub mod repository;
pub mod transport;
pub mod value_object;

pub use color::ColorGenerator;
pub use entity::{ChatEvent, PresenceRecord, RoomSummary};
pub use error::{RepositoryError, TransportError, ValueObjectError};
pub use repository::PresenceRepository;
pub use transport::{BroadcastTarget, PusherChannel, RoomTransport};
pub use value_object::{ConnectionId, ConnectionIdFactory, DisplayColor, DisplayName, RoomName};
