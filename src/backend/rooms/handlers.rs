/**
 * Room Handlers
 *
 * Thin controllers over `TcpTransport`: parse the request, call the
 * transport, wrap the result in JSON. Error statuses come from
 * `BackendError`.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::rooms::types::{
    CreateRoomResponse, JoinRoomRequest, MessageResponse, RoomsResponse,
};
use crate::network::{TcpTransport, Transport};
use crate::shared::Peer;

/// `GET /rooms`
pub async fn get_rooms(State(transport): State<Arc<TcpTransport>>) -> Json<RoomsResponse> {
    Json(RoomsResponse {
        rooms: transport.get_all_rooms(),
    })
}

/// `POST /create-room`
pub async fn create_room(
    State(transport): State<Arc<TcpTransport>>,
    payload: Result<Json<Peer>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), BackendError> {
    let Json(host) = payload?;
    let room_id = transport.create_room(host)?;

    Ok((StatusCode::CREATED, Json(CreateRoomResponse { room_id })))
}

/// `POST /join-room`
pub async fn join_room(
    State(transport): State<Arc<TcpTransport>>,
    payload: Result<Json<JoinRoomRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, BackendError> {
    let Json(request) = payload?;
    let peer_id = request.peer.id.clone();
    transport.join_room(&request.room_id, request.peer)?;

    Ok(Json(MessageResponse {
        message: format!("Peer {} joined room {}", peer_id, request.room_id),
    }))
}

/// `POST /leave-room/{room_id}/{peer_id}`
pub async fn leave_room(
    State(transport): State<Arc<TcpTransport>>,
    Path((room_id, peer_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, BackendError> {
    transport.leave_room(&room_id, &peer_id)?;

    Ok(Json(MessageResponse {
        message: format!("Peer {} left room {}", peer_id, room_id),
    }))
}
