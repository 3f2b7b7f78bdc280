/**
 * Transport Identity and Signaling Types
 *
 * `TransportKind` names the protocol behind a transport instance.
 * `Signal` is the signaling message exchanged while a WebRTC peer
 * connection is negotiated (offer, answer, ICE candidate).
 */
use serde::{Deserialize, Serialize};
use std::fmt;

/// The protocol a transport is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Tcp,
    WebRtc,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
            Self::WebRtc => write!(f, "webrtc"),
        }
    }
}

/// A WebRTC signaling message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// "offer", "answer" or "ice"
    #[serde(rename = "type")]
    pub kind: String,
    /// Protocol payload (SDP or ICE candidate)
    pub data: serde_json::Value,
}

impl Signal {
    pub fn new(kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }
}
