use serde::{Deserialize, Serialize};

/// Body of `POST /rooms/{room_id}/send-message`
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: String,
    pub message: String,
}

/// Body of a successful send
#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: String,
    pub chat_history: Vec<String>,
}

/// Body of `GET /rooms/{room_id}/chats`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub chat_history: Vec<String>,
}
