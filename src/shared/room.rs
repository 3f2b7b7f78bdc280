/**
 * Room Data Structure
 *
 * A room is a collaboration session: one host, the set of peers currently
 * in it (keyed by peer ID) and an append-only chat history. Rooms are
 * stored by value inside a `RoomRegistry`; callers outside the registry only
 * ever see clones.
 */
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::Peer;

/// A collaborative editing room
///
/// Serialized as `{id, host, peers, chat}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Room {
    /// 16 lowercase hex characters
    pub id: String,
    /// Peer that created the room
    pub host: Peer,
    /// Members keyed by peer ID
    pub peers: HashMap<String, Peer>,
    /// Chat lines, oldest first
    pub chat: Vec<String>,
}

impl Room {
    /// Create a room whose only member is `host`
    ///
    /// The connection stays with the member entry only, so it is released
    /// when the host leaves.
    pub fn new(id: String, host: Peer) -> Self {
        let host_record = Peer {
            connection: None,
            ..host.clone()
        };
        let mut peers = HashMap::new();
        peers.insert(host.id.clone(), host);
        Self {
            id,
            host: host_record,
            peers,
            chat: Vec::new(),
        }
    }

    /// Whether `peer_id` is a member
    pub fn contains(&self, peer_id: &str) -> bool {
        self.peers.contains_key(peer_id)
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }
}
