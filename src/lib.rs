//! codecollab - Collaborative Editing Backend Core
//!
//! codecollab is the server core of a collaborative code editor: peers meet in
//! rooms, rooms are realized by a network transport, and every room carries a
//! chat history.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by the core and the HTTP layer
//!   - Peer, Room, ChatMessage, Signal
//!   - Error taxonomy (`CollabError`)
//!   - Application configuration
//!
//! - **`network`** - Transports and the room registry
//!   - `Transport` trait, `TcpTransport`, experimental `RtcTransport`
//!   - `RoomRegistry` and room ID generation
//!
//! - **`chat`** - `ChatService` (send/receive room chat)
//!
//! - **`backend`** - HTTP server (only compiled with the `ssr` feature)
//!   - Axum router with room and chat controllers
//!   - Server state, configuration loading, HTTP error mapping
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use codecollab::chat::ChatService;
//! use codecollab::network::{TcpTransport, Transport};
//! use codecollab::shared::Peer;
//!
//! # fn example() -> codecollab::shared::CollabResult<()> {
//! let transport = Arc::new(TcpTransport::new());
//! let chat = ChatService::new(Arc::clone(&transport));
//!
//! let host = Peer::new("h1", "Host", "h@example.com", "127.0.0.1:9001");
//! let room_id = transport.create_room(host.clone())?;
//! chat.send(&room_id, &host, "hello")?;
//! let history = chat.receive(&room_id)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - Each transport owns one `RoomRegistry`; every room operation runs under
//!   its single mutex, so transports can be shared freely behind `Arc`
//! - The lock is never held across an `.await`
//!
//! # Error Handling
//!
//! - Core operations return `CollabResult<T>` (`shared::error`)
//! - The HTTP layer maps errors to status codes in `backend::error`

/// Shared types and data structures
pub mod shared;

/// Transports and room registry
pub mod network;

/// Room chat
pub mod chat;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
