/**
 * Peer Data Structure
 *
 * This module defines the `Peer` struct, the participant in a collaboration
 * session, and `Connection`, the handle to the TCP stream a peer is reached
 * through once the transport has accepted one from the peer's address.
 *
 * Peers are value-like: they are cloned freely between the request path and
 * the room that stores them. The connection handle is reference counted, so
 * clones of a peer share the same stream.
 */
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A participant in the collaborative editing network
///
/// Serialized as `{id, name, email, address, online}`. Missing fields
/// deserialize to their defaults so a join request may carry only an ID.
///
/// # Example
/// ```rust
/// use codecollab::shared::Peer;
///
/// let peer: Peer = serde_json::from_str(r#"{"id":"p1"}"#).unwrap();
/// assert_eq!(peer.id, "p1");
/// assert!(peer.connection.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Peer {
    /// Identifier, unique within a room's peer set
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// `host:port` the peer is reachable at
    pub address: String,
    /// Whether a live connection is attached
    pub online: bool,
    /// Accepted TCP connection, attached by the transport
    #[serde(skip)]
    pub connection: Option<Connection>,
}

impl Peer {
    /// Create a peer with every descriptive field set
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            address: address.into(),
            online: false,
            connection: None,
        }
    }

    /// Create a peer that only carries an ID
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Name of the first required host field that is empty, if any
    ///
    /// A room host needs an ID, a name, an address and an email.
    pub fn missing_host_field(&self) -> Option<&'static str> {
        [
            ("id", &self.id),
            ("name", &self.name),
            ("address", &self.address),
            ("email", &self.email),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
    }

    /// Attach an accepted connection and mark the peer online
    pub fn attach(&mut self, connection: Connection) {
        self.connection = Some(connection);
        self.online = true;
    }
}

/// Handle to an accepted TCP stream
///
/// Cloning the handle shares the stream.
#[derive(Clone)]
pub struct Connection {
    id: Uuid,
    remote_addr: SocketAddr,
    stream: Arc<Mutex<TcpStream>>,
}

impl Connection {
    /// Wrap a freshly accepted stream
    pub fn new(stream: TcpStream, remote_addr: SocketAddr) -> Self {
        Self {
            id: Uuid::new_v4(),
            remote_addr,
            stream: Arc::new(Mutex::new(stream)),
        }
    }

    /// Unique ID assigned when the stream was accepted
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Address the stream was accepted from
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// The underlying stream
    pub fn stream(&self) -> Arc<Mutex<TcpStream>> {
        Arc::clone(&self.stream)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("remote_addr", &self.remote_addr)
            .finish_non_exhaustive()
    }
}
