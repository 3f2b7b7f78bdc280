/**
 * Chat Service
 *
 * Sends and reads room chat through the registry of the transport it
 * holds. The service owns no state of its own; two services over the same
 * transport see the same history.
 */
use std::sync::Arc;

use crate::network::Transport;
use crate::shared::error::CollabResult;
use crate::shared::{ChatMessage, Peer};

/// Chat operations over a transport
pub struct ChatService<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for ChatService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + ?Sized> ChatService<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Transport this service writes through
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Append `content` from `sender` to the chat history of `room_id`
    ///
    /// The sender does not have to be a member of the room.
    pub fn send(&self, room_id: &str, sender: &Peer, content: &str) -> CollabResult<()> {
        let message = ChatMessage::new(sender.clone(), content);
        self.transport
            .registry()
            .append_chat(room_id, message.line())
            .map_err(|e| {
                tracing::warn!("[Chat] Failed to send message to room {}: {}", room_id, e);
                e
            })?;

        tracing::debug!("[Chat] Peer {} sent a message to room {}", sender.id, room_id);
        Ok(())
    }

    /// Copy of the chat history of `room_id`, oldest first
    pub fn receive(&self, room_id: &str) -> CollabResult<Vec<String>> {
        self.transport.registry().chat_history(room_id)
    }
}
