/**
 * Chat Handlers
 *
 * The sender is identified by ID only; it does not have to be a member of
 * the room.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::backend::chat::types::{ChatHistoryResponse, SendMessageRequest, SendMessageResponse};
use crate::backend::error::BackendError;
use crate::chat::ChatService;
use crate::network::TcpTransport;
use crate::shared::Peer;

/// `POST /rooms/{room_id}/send-message`
pub async fn send_message(
    State(chat): State<ChatService<TcpTransport>>,
    Path(room_id): Path<String>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, BackendError> {
    let Json(request) = payload?;
    let sender = Peer::with_id(request.sender_id);

    chat.send(&room_id, &sender, &request.message)?;
    let chat_history = chat.receive(&room_id)?;

    Ok(Json(SendMessageResponse {
        message: "Message sent successfully".to_string(),
        chat_history,
    }))
}

/// `GET /rooms/{room_id}/chats`
pub async fn get_chats(
    State(chat): State<ChatService<TcpTransport>>,
    Path(room_id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, BackendError> {
    let chat_history = chat.receive(&room_id)?;
    Ok(Json(ChatHistoryResponse { chat_history }))
}
