//! Shared Module
//!
//! This module contains the data types that both the room/transport core and
//! the HTTP backend work with. All wire-visible types serialize to the JSON
//! shapes the controllers return.
//!
//! # Overview
//!
//! - **`peer`** - `Peer` and the `Connection` handle attached to it
//! - **`room`** - `Room` (host, peers, chat history)
//! - **`chat`** - `ChatMessage` and the chat-history line format
//! - **`signal`** - `TransportKind` and WebRTC `Signal`
//! - **`error`** - `CollabError`, the core error taxonomy
//! - **`config`** - `AppConfig` and its builder

/// Peer and connection types
pub mod peer;

/// Room data structure
pub mod room;

/// Chat message type
pub mod chat;

/// Transport identity and signaling types
pub mod signal;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use peer::{Connection, Peer};
pub use room::Room;
pub use chat::ChatMessage;
pub use signal::{Signal, TransportKind};
pub use error::{CollabError, CollabResult, ErrorKind};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
