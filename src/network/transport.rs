/**
 * Transport Abstraction
 *
 * A transport is the network layer that realizes rooms: it accepts peer
 * connections and owns the room registry. TCP is the primary implementation;
 * WebRTC is experimental and adds the signaling/data-channel capability set
 * through `SignalingTransport`.
 *
 * Both traits are object safe, so a server can hold an
 * `Arc<dyn Transport>` without knowing the protocol underneath.
 */
use async_trait::async_trait;

use crate::network::registry::RoomRegistry;
use crate::shared::error::CollabResult;
use crate::shared::{Peer, Signal, TransportKind};

/// Capability set every transport provides
#[async_trait]
pub trait Transport: Send + Sync {
    /// Protocol behind this transport
    fn kind(&self) -> TransportKind;

    /// Start accepting connections on `address` (`host:port`)
    ///
    /// Calling it again while already listening is a no-op. Fails with
    /// `CollabError::Bind` if the address is invalid or in use.
    async fn listen(&self, address: &str) -> CollabResult<()>;

    /// Stop listening and release the listener
    ///
    /// Succeeds without doing anything when not listening.
    async fn close(&self) -> CollabResult<()>;

    /// Create a room hosted by `host` and return its ID
    ///
    /// The host must have a non-empty ID, name, address and email.
    fn create_room(&self, host: Peer) -> CollabResult<String>;

    /// Add `peer` to the room `room_id`
    ///
    /// Fails if the room does not exist or already has a peer with the same ID.
    fn join_room(&self, room_id: &str, peer: Peer) -> CollabResult<()>;

    /// Remove `peer_id` from the room `room_id`
    fn leave_room(&self, room_id: &str, peer_id: &str) -> CollabResult<()>;

    /// Registry holding this transport's rooms
    fn registry(&self) -> &RoomRegistry;
}

/// WebRTC signaling and data-channel operations
///
/// Experimental: no implementation delivers data yet. Implementations must
/// reject unsupported operations with `CollabError::Unsupported` rather than
/// pretend to succeed.
#[async_trait]
pub trait SignalingTransport: Transport {
    /// Hand a signaling message (offer, answer, ICE candidate) to `peer_id`
    async fn exchange_signal(&self, room_id: &str, peer_id: &str, signal: Signal) -> CollabResult<()>;

    /// Send bytes to `peer_id` over its data channel
    async fn send_data(&self, room_id: &str, peer_id: &str, data: &[u8]) -> CollabResult<()>;

    /// Receive bytes from `peer_id` over its data channel
    async fn receive_data(&self, room_id: &str, peer_id: &str) -> CollabResult<Vec<u8>>;
}
