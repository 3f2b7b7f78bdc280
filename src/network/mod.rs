//! Network Module
//!
//! Transports and the room registry they own.
//!
//! # Overview
//!
//! - **`registry`** - `RoomRegistry`: room ID to `Room`, behind one mutex
//! - **`transport`** - `Transport` and `SignalingTransport` traits
//! - **`tcp`** - `TcpTransport`, the primary implementation
//! - **`rtc`** - `RtcTransport`, experimental WebRTC variant
//!
//! # Example
//!
//! ```rust,no_run
//! use codecollab::network::{TcpTransport, Transport};
//! use codecollab::shared::Peer;
//!
//! # async fn example() -> codecollab::shared::CollabResult<()> {
//! let transport = TcpTransport::new();
//! transport.listen("127.0.0.1:9000").await?;
//!
//! let host = Peer::new("h1", "Host", "h@example.com", "127.0.0.1:9001");
//! let room_id = transport.create_room(host)?;
//! transport.join_room(&room_id, Peer::with_id("p1"))?;
//! # Ok(())
//! # }
//! ```

/// Room registry and room ID generation
pub mod registry;

/// Transport traits
pub mod transport;

/// TCP transport
pub mod tcp;

/// WebRTC transport (experimental)
pub mod rtc;

pub use registry::{generate_room_id, Departure, EmptyRoomPolicy, RoomRegistry};
pub use rtc::{PeerConnectionSlot, RtcTransport};
pub use tcp::TcpTransport;
pub use transport::{SignalingTransport, Transport};
