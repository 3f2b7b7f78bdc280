//! Rooms Backend Module
//!
//! HTTP controllers for the room lifecycle on the TCP transport.
//!
//! # Endpoints
//!
//! - `GET /rooms` - every room, keyed by room ID
//! - `POST /create-room` - body: host `Peer`; returns the new room ID
//! - `POST /join-room` - body: `{"room_id", "peer"}`
//! - `POST /leave-room/{room_id}/{peer_id}`

/// Request and response bodies
pub mod types;

/// Route handlers
pub mod handlers;

pub use handlers::{create_room, get_rooms, join_room, leave_room};
