//! Shared Error Types
//!
//! This module defines the error taxonomy of the room/transport core. Every
//! transport, registry and chat operation returns `Result<_, CollabError>`;
//! the backend wraps these errors and maps them to HTTP responses.
//!
//! # Error Categories
//!
//! - `Validation` - malformed input (e.g. a host peer with an empty field)
//! - `NotFound` - unknown room, or a peer that is not a member of the room
//! - `Conflict` - a peer that is already a member of the room
//! - `Bind` - the listen address is invalid or already in use
//! - `RandomSource` - the entropy source failed while generating a room ID
//! - `Serialization` - chat message JSON encoding/decoding failed
//! - `Unsupported` - an experimental transport operation that is not implemented
//!
//! # Usage
//!
//! ```rust
//! use codecollab::shared::error::{CollabError, ErrorKind};
//!
//! let error = CollabError::room_not_found("abc123");
//! assert_eq!(error.kind(), ErrorKind::NotFound);
//! assert_eq!(error.to_string(), "room abc123 does not exist");
//! ```
use std::io;
use thiserror::Error;

use crate::shared::TransportKind;

/// Result alias used by the core
pub type CollabResult<T> = Result<T, CollabError>;

/// Errors produced by the room registry, the transports and the chat service
#[derive(Debug, Error)]
pub enum CollabError {
    /// Input rejected before any state was touched
    #[error("{message}")]
    Validation {
        /// The offending field
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The referenced room is not in the registry
    #[error("room {room_id} does not exist")]
    RoomNotFound {
        /// Requested room ID
        room_id: String,
    },

    /// The referenced peer is not a member of the room
    #[error("peer {peer_id} is not in room {room_id}")]
    PeerNotInRoom {
        /// Requested peer ID
        peer_id: String,
        /// Room that was searched
        room_id: String,
    },

    /// The peer is already a member of the room
    #[error("peer {peer_id} is already in room {room_id}")]
    PeerAlreadyInRoom {
        /// Duplicate peer ID
        peer_id: String,
        /// Target room
        room_id: String,
    },

    /// The listener could not be bound
    #[error("failed to listen on {address}: {source}")]
    Bind {
        /// Address passed to `listen`
        address: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The entropy source failed while generating a room ID
    #[error("random source failure: {message}")]
    RandomSource {
        /// Error reported by the entropy source
        message: String,
    },

    /// JSON serialization or deserialization failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// Operation exists on the trait but has no working implementation
    #[error("{operation} is not supported by the {transport} transport")]
    Unsupported {
        /// Name of the operation
        operation: &'static str,
        /// Transport that rejected it
        transport: TransportKind,
    },
}

/// Error category, independent of the details carried by each variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Bind,
    RandomSource,
    Serialization,
    Unsupported,
}

impl CollabError {
    /// Create a validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a room-not-found error
    pub fn room_not_found(room_id: impl Into<String>) -> Self {
        Self::RoomNotFound {
            room_id: room_id.into(),
        }
    }

    /// Create a peer-not-in-room error
    pub fn peer_not_in_room(peer_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self::PeerNotInRoom {
            peer_id: peer_id.into(),
            room_id: room_id.into(),
        }
    }

    /// Create a duplicate-peer error
    pub fn peer_already_in_room(peer_id: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self::PeerAlreadyInRoom {
            peer_id: peer_id.into(),
            room_id: room_id.into(),
        }
    }

    /// Create a random-source error
    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSource {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::RoomNotFound { .. } | Self::PeerNotInRoom { .. } => ErrorKind::NotFound,
            Self::PeerAlreadyInRoom { .. } => ErrorKind::Conflict,
            Self::Bind { .. } => ErrorKind::Bind,
            Self::RandomSource { .. } => ErrorKind::RandomSource,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// True for unknown rooms and missing members
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for CollabError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<getrandom::Error> for CollabError {
    fn from(err: getrandom::Error) -> Self {
        Self::random_source(err.to_string())
    }
}
