//! Chat Backend Module
//!
//! HTTP controllers for room chat, backed by `ChatService`.
//!
//! # Endpoints
//!
//! - `POST /rooms/{room_id}/send-message` - body: `{"sender_id", "message"}`;
//!   returns the updated history
//! - `GET /rooms/{room_id}/chats` - the room's history
//!
//! # Example
//!
//! ```json
//! {
//!   "message": "Message sent successfully",
//!   "chat_history": ["[19-10-2026] p1: hello"]
//! }
//! ```

/// Request and response bodies
pub mod types;

/// Route handlers
pub mod handlers;

pub use handlers::{get_chats, send_message};
