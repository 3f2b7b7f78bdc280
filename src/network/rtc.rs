/**
 * WebRTC Transport (experimental)
 *
 * Room bookkeeping identical to TCP, plus one peer-connection slot per
 * member. No ICE or DTLS stack is wired in: signals are validated, logged
 * and remembered on the target's slot, and data-channel operations are
 * rejected with `CollabError::Unsupported`.
 *
 * Unlike TCP, a room survives after its last peer leaves.
 *
 * Lock order: the slot table is always taken before the registry. The
 * listen address has its own async lock, held for a whole `listen` call.
 */
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::network::registry::{EmptyRoomPolicy, RoomRegistry};
use crate::network::transport::{SignalingTransport, Transport};
use crate::shared::error::{CollabError, CollabResult};
use crate::shared::{Peer, Signal, TransportKind};

/// Per-peer state of a WebRTC peer connection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeerConnectionSlot {
    /// Last signaling message addressed to this peer
    pub last_signal: Option<Signal>,
}

type SlotTable = HashMap<String, HashMap<String, PeerConnectionSlot>>;

/// Experimental WebRTC transport
pub struct RtcTransport {
    registry: RoomRegistry,
    slots: Mutex<SlotTable>,
    listen_addr: tokio::sync::Mutex<Option<String>>,
}

impl RtcTransport {
    pub fn new() -> Self {
        Self {
            registry: RoomRegistry::new(EmptyRoomPolicy::Keep),
            slots: Mutex::new(HashMap::new()),
            listen_addr: tokio::sync::Mutex::new(None),
        }
    }

    /// Address recorded by the last successful `listen`
    pub async fn listen_addr(&self) -> Option<String> {
        self.listen_addr.lock().await.clone()
    }

    /// Copy of the peer-connection slot of `peer_id` in `room_id`
    pub fn peer_connection(&self, room_id: &str, peer_id: &str) -> Option<PeerConnectionSlot> {
        self.slots()
            .get(room_id)
            .and_then(|peers| peers.get(peer_id))
            .cloned()
    }

    fn slots(&self) -> MutexGuard<'_, SlotTable> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RtcTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for RtcTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::WebRtc
    }

    async fn listen(&self, address: &str) -> CollabResult<()> {
        let mut listen_addr = self.listen_addr.lock().await;
        if let Some(current) = listen_addr.as_ref() {
            tracing::debug!("[Rtc] Already accepting signaling for {}", current);
            return Ok(());
        }

        // Only the address is checked; there is no socket to bind yet.
        let mut resolved = tokio::net::lookup_host(address)
            .await
            .map_err(|source| CollabError::Bind {
                address: address.to_string(),
                source,
            })?;
        if resolved.next().is_none() {
            return Err(CollabError::Bind {
                address: address.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AddrNotAvailable,
                    "address did not resolve",
                ),
            });
        }

        *listen_addr = Some(address.to_string());
        tracing::info!("[Rtc] Accepting signaling for {}", address);
        Ok(())
    }

    async fn close(&self) -> CollabResult<()> {
        if let Some(address) = self.listen_addr.lock().await.take() {
            tracing::info!("[Rtc] Stopped signaling for {}", address);
        }
        Ok(())
    }

    fn create_room(&self, host: Peer) -> CollabResult<String> {
        let host_id = host.id.clone();
        let mut slots = self.slots();
        let room_id = self.registry.create_room(host)?;

        slots
            .entry(room_id.clone())
            .or_default()
            .insert(host_id.clone(), PeerConnectionSlot::default());

        tracing::info!("[Rtc] Peer {} created room {}", host_id, room_id);
        Ok(room_id)
    }

    fn join_room(&self, room_id: &str, peer: Peer) -> CollabResult<()> {
        let peer_id = peer.id.clone();
        let mut slots = self.slots();
        self.registry.join_room(room_id, peer)?;

        slots
            .entry(room_id.to_string())
            .or_default()
            .insert(peer_id.clone(), PeerConnectionSlot::default());

        tracing::info!("[Rtc] Peer {} joined room {}", peer_id, room_id);
        Ok(())
    }

    fn leave_room(&self, room_id: &str, peer_id: &str) -> CollabResult<()> {
        let mut slots = self.slots();
        self.registry.leave_room(room_id, peer_id)?;

        if let Some(peers) = slots.get_mut(room_id) {
            peers.remove(peer_id);
        }

        tracing::info!("[Rtc] Peer {} left room {}", peer_id, room_id);
        Ok(())
    }

    fn registry(&self) -> &RoomRegistry {
        &self.registry
    }
}

#[async_trait]
impl SignalingTransport for RtcTransport {
    async fn exchange_signal(&self, room_id: &str, peer_id: &str, signal: Signal) -> CollabResult<()> {
        let mut slots = self.slots();
        self.registry.ensure_member(room_id, peer_id)?;

        let payload = serde_json::to_string(&signal)?;
        tracing::debug!("[Rtc] Signal for peer {} in room {}: {}", peer_id, room_id, payload);

        slots
            .entry(room_id.to_string())
            .or_default()
            .entry(peer_id.to_string())
            .or_default()
            .last_signal = Some(signal);
        Ok(())
    }

    async fn send_data(&self, room_id: &str, peer_id: &str, data: &[u8]) -> CollabResult<()> {
        self.registry.ensure_member(room_id, peer_id)?;
        tracing::debug!(
            "[Rtc] Rejecting {} bytes for peer {} in room {}",
            data.len(),
            peer_id,
            room_id
        );
        Err(CollabError::Unsupported {
            operation: "send_data",
            transport: TransportKind::WebRtc,
        })
    }

    async fn receive_data(&self, room_id: &str, peer_id: &str) -> CollabResult<Vec<u8>> {
        self.registry.ensure_member(room_id, peer_id)?;
        Err(CollabError::Unsupported {
            operation: "receive_data",
            transport: TransportKind::WebRtc,
        })
    }
}
