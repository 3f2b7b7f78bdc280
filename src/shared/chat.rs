/**
 * Chat Message Data Structure
 *
 * A chat message pairs the sending peer with the text and the time it was
 * sent. Rooms store chat history as rendered lines of the form
 * `[dd-mm-YYYY] <sender id>: <content>`; the structured form is what travels
 * over the wire as JSON.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::{CollabError, CollabResult};
use crate::shared::Peer;

/// Date format used in rendered chat lines (day-month-year)
pub const CHAT_DATE_FORMAT: &str = "%d-%m-%Y";

/// A message sent to a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sending peer
    pub sender: Peer,
    /// Message text
    pub content: String,
    /// When the message was sent (UTC)
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message stamped with the current time
    pub fn new(sender: Peer, content: impl Into<String>) -> Self {
        Self::at(sender, content, Utc::now())
    }

    /// Create a message with an explicit timestamp
    pub fn at(sender: Peer, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp,
        }
    }

    /// Render the line stored in a room's chat history
    pub fn line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format(CHAT_DATE_FORMAT),
            self.sender.id,
            self.content
        )
    }

    /// Encode as JSON bytes
    pub fn to_json(&self) -> CollabResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| CollabError::serialization(format!("failed to serialize message: {}", e)))
    }

    /// Decode from JSON bytes
    pub fn from_json(data: &[u8]) -> CollabResult<Self> {
        serde_json::from_slice(data)
            .map_err(|e| CollabError::serialization(format!("failed to deserialize message: {}", e)))
    }
}
