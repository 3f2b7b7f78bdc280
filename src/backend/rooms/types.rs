use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::{Peer, Room};

/// Body of `GET /rooms`
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: HashMap<String, Room>,
}

/// Body of a successful `POST /create-room`
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
}

/// Body of `POST /join-room`
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub room_id: String,
    #[serde(alias = "Peer")]
    pub peer: Peer,
}

/// Confirmation returned by join and leave
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
