/**
 * Room Registry
 *
 * The registry is the only shared mutable state of the collaboration core:
 * a map from room ID to `Room`, guarded by one mutex. Each transport owns
 * exactly one registry; nothing else mutates it.
 *
 * # Locking
 *
 * Every operation takes the lock once, performs its whole check-and-mutate
 * sequence, and releases it before returning. The lock is never held across
 * an `.await` or any I/O, so it is a plain `std::sync::Mutex`.
 *
 * # Room IDs
 *
 * Room IDs are 8 bytes from the registry's entropy source, hex encoded
 * (16 lowercase characters). A failing entropy source surfaces as
 * `CollabError::RandomSource`; no room is created in that case.
 */
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::shared::error::{CollabError, CollabResult};
use crate::shared::{Peer, Room};

/// Number of random bytes in a room ID
pub const ROOM_ID_BYTES: usize = 8;

/// Fills a buffer with random bytes
pub type EntropySource = fn(&mut [u8]) -> Result<(), getrandom::Error>;

/// Generate a room ID from the operating system's entropy source
pub fn generate_room_id() -> CollabResult<String> {
    generate_room_id_from(getrandom::fill)
}

/// Generate a room ID from `source`
pub fn generate_room_id_from(source: EntropySource) -> CollabResult<String> {
    let mut bytes = [0u8; ROOM_ID_BYTES];
    source(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// What happens to a room when its last peer leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRoomPolicy {
    /// Delete the room from the registry
    Remove,
    /// Leave the empty room registered
    Keep,
}

/// Result of a successful `leave_room`
#[derive(Debug, Clone)]
pub struct Departure {
    /// The peer that was removed
    pub peer: Peer,
    /// Whether the room was deleted because it became empty
    pub room_removed: bool,
}

/// Map of active rooms, keyed by room ID
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<String, Room>>,
    empty_room_policy: EmptyRoomPolicy,
    entropy: EntropySource,
}

impl RoomRegistry {
    /// Create an empty registry backed by the OS entropy source
    pub fn new(empty_room_policy: EmptyRoomPolicy) -> Self {
        Self::with_entropy(empty_room_policy, getrandom::fill)
    }

    /// Create an empty registry with a custom entropy source
    pub fn with_entropy(empty_room_policy: EmptyRoomPolicy, entropy: EntropySource) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            empty_room_policy,
            entropy,
        }
    }

    // Every mutation is a single map operation, so a poisoned map is still consistent.
    fn rooms(&self) -> MutexGuard<'_, HashMap<String, Room>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new room with `host` as its only peer
    ///
    /// The host must have a non-empty ID, name, address and email.
    /// Returns the generated room ID.
    pub fn create_room(&self, host: Peer) -> CollabResult<String> {
        if let Some(field) = host.missing_host_field() {
            return Err(CollabError::validation(
                field,
                format!("host peer must have a non-empty {}", field),
            ));
        }

        let room_id = generate_room_id_from(self.entropy)?;
        let room = Room::new(room_id.clone(), host);

        self.rooms().insert(room_id.clone(), room);
        Ok(room_id)
    }

    /// Add `peer` to an existing room
    pub fn join_room(&self, room_id: &str, peer: Peer) -> CollabResult<()> {
        let mut rooms = self.rooms();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| CollabError::room_not_found(room_id))?;

        if room.contains(&peer.id) {
            return Err(CollabError::peer_already_in_room(&peer.id, room_id));
        }

        room.peers.insert(peer.id.clone(), peer);
        Ok(())
    }

    /// Remove `peer_id` from a room
    ///
    /// Under `EmptyRoomPolicy::Remove` the room itself is deleted once its
    /// last peer has left.
    pub fn leave_room(&self, room_id: &str, peer_id: &str) -> CollabResult<Departure> {
        let mut rooms = self.rooms();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| CollabError::room_not_found(room_id))?;

        let peer = room
            .peers
            .remove(peer_id)
            .ok_or_else(|| CollabError::peer_not_in_room(peer_id, room_id))?;

        let room_removed = room.is_empty() && self.empty_room_policy == EmptyRoomPolicy::Remove;
        if room_removed {
            rooms.remove(room_id);
        }

        Ok(Departure { peer, room_removed })
    }

    /// Fail with the matching not-found error unless `peer_id` is in `room_id`
    pub fn ensure_member(&self, room_id: &str, peer_id: &str) -> CollabResult<()> {
        let rooms = self.rooms();
        let room = rooms
            .get(room_id)
            .ok_or_else(|| CollabError::room_not_found(room_id))?;
        if !room.contains(peer_id) {
            return Err(CollabError::peer_not_in_room(peer_id, room_id));
        }
        Ok(())
    }

    /// Append a line to a room's chat history
    pub fn append_chat(&self, room_id: &str, line: String) -> CollabResult<()> {
        let mut rooms = self.rooms();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| CollabError::room_not_found(room_id))?;
        room.chat.push(line);
        Ok(())
    }

    /// Copy of a room's chat history
    pub fn chat_history(&self, room_id: &str) -> CollabResult<Vec<String>> {
        self.rooms()
            .get(room_id)
            .map(|room| room.chat.clone())
            .ok_or_else(|| CollabError::room_not_found(room_id))
    }

    /// Copy of a single room
    pub fn get(&self, room_id: &str) -> Option<Room> {
        self.rooms().get(room_id).cloned()
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms().contains_key(room_id)
    }

    /// Copy of every registered room
    pub fn snapshot(&self) -> HashMap<String, Room> {
        self.rooms().clone()
    }

    pub fn len(&self) -> usize {
        self.rooms().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms().is_empty()
    }
}
