/**
 * TCP Transport
 *
 * The primary transport. It owns:
 * - the room registry (rooms are deleted as soon as their last peer leaves)
 * - an optional TCP listener with its accept task
 * - the table of accepted connections not yet attached to a peer
 *
 * # Connections
 *
 * Every stream accepted by the listener is recorded under its remote
 * address. When a peer whose `address` equals a recorded remote address
 * creates or joins a room, the connection is moved onto the peer and the
 * peer is marked online.
 *
 * While a connection is pending, a watcher task peeks at the stream and
 * drops the entry once the client hangs up. At most `pending_limit`
 * connections are pending at once; further streams are closed on accept.
 *
 * # Locking
 *
 * Registry operations are synchronous and take the registry lock once.
 * The connection table has its own short-lived lock; the two are never
 * held at the same time.
 */
use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::network::registry::{EmptyRoomPolicy, RoomRegistry};
use crate::network::transport::Transport;
use crate::shared::error::{CollabError, CollabResult};
use crate::shared::{Connection, Peer, Room, TransportKind};

/// Pause after a failed `accept` before trying again
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Pause between peeks while a pending client has unread data
const PENDING_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default cap on connections not yet attached to a peer
pub const DEFAULT_PENDING_LIMIT: usize = 1024;

/// An accepted connection and the task watching it for hang-up
struct PendingConnection {
    connection: Connection,
    watcher: JoinHandle<()>,
}

type ConnectionTable = Arc<std::sync::Mutex<HashMap<SocketAddr, PendingConnection>>>;

/// A bound listener and the task accepting from it
struct ListenerHandle {
    local_addr: SocketAddr,
    accept_task: JoinHandle<()>,
}

/// Transport over plain TCP
pub struct TcpTransport {
    registry: RoomRegistry,
    listener: Mutex<Option<ListenerHandle>>,
    connections: ConnectionTable,
    pending_limit: usize,
}

impl TcpTransport {
    /// Create a transport with an empty registry that is not listening
    pub fn new() -> Self {
        Self::with_registry(RoomRegistry::new(EmptyRoomPolicy::Remove))
    }

    /// Create a transport around an existing registry
    pub fn with_registry(registry: RoomRegistry) -> Self {
        Self {
            registry,
            listener: Mutex::new(None),
            connections: Arc::new(std::sync::Mutex::new(HashMap::new())),
            pending_limit: DEFAULT_PENDING_LIMIT,
        }
    }

    /// Cap the number of pending connections (at least one)
    pub fn with_pending_limit(mut self, limit: usize) -> Self {
        self.pending_limit = limit.max(1);
        self
    }

    /// Snapshot of every room
    pub fn get_all_rooms(&self) -> HashMap<String, Room> {
        self.registry.snapshot()
    }

    /// Address the listener is bound to, if listening
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.lock().await.as_ref().map(|handle| handle.local_addr)
    }

    pub async fn is_listening(&self) -> bool {
        self.listener.lock().await.is_some()
    }

    /// Remote addresses of accepted connections not yet attached to a peer
    pub fn pending_connections(&self) -> Vec<SocketAddr> {
        lock_table(&self.connections).keys().copied().collect()
    }

    /// Attach the connection accepted from `peer.address`, if there is one
    fn attach_connection(&self, mut peer: Peer) -> Peer {
        let Ok(addr) = peer.address.parse::<SocketAddr>() else {
            return peer;
        };
        let pending = lock_table(&self.connections)
            .get(&addr)
            .map(|pending| pending.connection.clone());
        if let Some(connection) = pending {
            tracing::debug!(
                "[Transport] Attaching connection {} to peer {}",
                connection.id(),
                peer.id
            );
            peer.attach(connection);
        }
        peer
    }

    /// Forget a connection once a peer in the registry owns it
    fn claim_connection(&self, connection: Option<&Connection>) {
        let Some(connection) = connection else {
            return;
        };
        let mut table = lock_table(&self.connections);
        if table
            .get(&connection.remote_addr())
            .is_some_and(|pending| pending.connection.id() == connection.id())
        {
            if let Some(pending) = table.remove(&connection.remote_addr()) {
                pending.watcher.abort();
            }
        }
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.get_mut().take() {
            handle.accept_task.abort();
        }
        drop_pending(&self.connections);
    }
}

#[async_trait]
impl Transport for TcpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Tcp
    }

    async fn listen(&self, address: &str) -> CollabResult<()> {
        let mut listener = self.listener.lock().await;
        if let Some(handle) = listener.as_ref() {
            tracing::debug!("[Transport] Already listening on {}", handle.local_addr);
            return Ok(());
        }

        let bind_error = |source| CollabError::Bind {
            address: address.to_string(),
            source,
        };
        let bound = TcpListener::bind(address).await.map_err(bind_error)?;
        let local_addr = bound.local_addr().map_err(bind_error)?;

        let accept_task = tokio::spawn(accept_loop(
            bound,
            Arc::clone(&self.connections),
            self.pending_limit,
        ));
        *listener = Some(ListenerHandle {
            local_addr,
            accept_task,
        });

        tracing::info!("[Transport] Listening for peer connections on {}", local_addr);
        Ok(())
    }

    async fn close(&self) -> CollabResult<()> {
        let Some(handle) = self.listener.lock().await.take() else {
            return Ok(());
        };

        handle.accept_task.abort();
        // The listener is owned by the task; awaiting it guarantees the socket is closed.
        let _ = handle.accept_task.await;

        let dropped = drop_pending(&self.connections);

        tracing::info!(
            "[Transport] Stopped listening on {} ({} pending connections dropped)",
            handle.local_addr,
            dropped
        );
        Ok(())
    }

    fn create_room(&self, host: Peer) -> CollabResult<String> {
        let host = self.attach_connection(host);
        let host_id = host.id.clone();
        let connection = host.connection.clone();

        let room_id = self.registry.create_room(host).map_err(|e| {
            tracing::warn!("[Rooms] Failed to create room: {}", e);
            e
        })?;
        self.claim_connection(connection.as_ref());

        tracing::info!("[Rooms] Peer {} created room {}", host_id, room_id);
        Ok(room_id)
    }

    fn join_room(&self, room_id: &str, peer: Peer) -> CollabResult<()> {
        let peer = self.attach_connection(peer);
        let peer_id = peer.id.clone();
        let connection = peer.connection.clone();

        self.registry.join_room(room_id, peer)?;
        self.claim_connection(connection.as_ref());

        tracing::info!("[Rooms] Peer {} joined room {}", peer_id, room_id);
        Ok(())
    }

    fn leave_room(&self, room_id: &str, peer_id: &str) -> CollabResult<()> {
        let departure = self.registry.leave_room(room_id, peer_id)?;

        tracing::info!("[Rooms] Peer {} left room {}", peer_id, room_id);
        if departure.room_removed {
            tracing::info!("[Rooms] Room {} is empty and was removed", room_id);
        }
        Ok(())
    }

    fn registry(&self) -> &RoomRegistry {
        &self.registry
    }
}

fn lock_table(table: &ConnectionTable) -> MutexGuard<'_, HashMap<SocketAddr, PendingConnection>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clear the pending table, stopping every watcher; returns how many were dropped
fn drop_pending(table: &ConnectionTable) -> usize {
    let mut table = lock_table(table);
    let count = table.len();
    for (_, pending) in table.drain() {
        pending.watcher.abort();
    }
    count
}

/// Accept streams until the task is aborted
async fn accept_loop(listener: TcpListener, connections: ConnectionTable, pending_limit: usize) {
    loop {
        match listener.accept().await {
            Ok((stream, remote_addr)) => {
                let mut table = lock_table(&connections);
                if table.len() >= pending_limit && !table.contains_key(&remote_addr) {
                    tracing::warn!(
                        "[Transport] Rejecting connection from {}: {} connections already pending",
                        remote_addr,
                        table.len()
                    );
                    continue;
                }

                let connection = Connection::new(stream, remote_addr);
                tracing::debug!(
                    "[Transport] Accepted connection {} from {}",
                    connection.id(),
                    remote_addr
                );

                // Spawned under the table lock so the watcher cannot remove the entry before it exists.
                let watcher = tokio::spawn(watch_for_hangup(
                    connection.clone(),
                    Arc::clone(&connections),
                ));
                let pending = PendingConnection { connection, watcher };
                if let Some(previous) = table.insert(remote_addr, pending) {
                    previous.watcher.abort();
                }
            }
            Err(e) => {
                tracing::warn!("[Transport] Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
            }
        }
    }
}

/// Remove a pending connection once its client hangs up
///
/// Aborted when a peer claims the connection, which releases the stream lock.
async fn watch_for_hangup(connection: Connection, connections: ConnectionTable) {
    let stream = connection.stream();
    let mut buf = [0u8; 1];
    loop {
        let peeked = stream.lock().await.peek(&mut buf).await;
        match peeked {
            Ok(0) => break,
            Ok(_) => tokio::time::sleep(PENDING_POLL_INTERVAL).await,
            Err(e) => {
                tracing::debug!(
                    "[Transport] Pending connection from {} failed: {}",
                    connection.remote_addr(),
                    e
                );
                break;
            }
        }
    }

    let mut table = lock_table(&connections);
    if table
        .get(&connection.remote_addr())
        .is_some_and(|pending| pending.connection.id() == connection.id())
    {
        table.remove(&connection.remote_addr());
        tracing::debug!(
            "[Transport] Client {} disconnected before joining a room",
            connection.remote_addr()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ErrorKind;
    use assert_matches::assert_matches;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn host() -> Peer {
        Peer::new("host_peer_id", "Host Peer", "host@example.com", "127.0.0.1:9000")
    }

    #[tokio::test]
    async fn test_listen_is_idempotent() {
        let transport = TcpTransport::new();

        transport.listen("127.0.0.1:0").await.unwrap();
        let addr = transport.local_addr().await.unwrap();
        assert_ne!(addr.port(), 0);

        transport.listen("127.0.0.1:0").await.unwrap();
        assert_eq!(transport.local_addr().await, Some(addr));

        transport.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_listen_invalid_address() {
        let transport = TcpTransport::new();

        let result = transport.listen("invalid_address").await;
        assert_matches!(result, Err(CollabError::Bind { ref address, .. }) if address == "invalid_address");
        assert!(!transport.is_listening().await);
    }

    #[tokio::test]
    async fn test_listen_address_in_use() {
        let first = TcpTransport::new();
        first.listen("127.0.0.1:0").await.unwrap();
        let addr = first.local_addr().await.unwrap();

        let second = TcpTransport::new();
        let result = second.listen(&addr.to_string()).await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Bind);

        first.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_releases_port() {
        let transport = TcpTransport::new();
        transport.listen("127.0.0.1:0").await.unwrap();
        let addr = transport.local_addr().await.unwrap();

        transport.close().await.unwrap();
        assert!(!transport.is_listening().await);

        transport.listen(&addr.to_string()).await.unwrap();
        assert_eq!(transport.local_addr().await, Some(addr));
        transport.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_when_not_listening() {
        let transport = TcpTransport::new();
        assert!(transport.close().await.is_ok());
        assert!(transport.close().await.is_ok());
    }

    #[tokio::test]
    async fn test_create_room() {
        let transport = TcpTransport::new();

        let room_id = transport.create_room(host()).unwrap();
        assert_eq!(room_id.len(), 16);

        let rooms = transport.get_all_rooms();
        let room = rooms.get(&room_id).unwrap();
        assert_eq!(room.host.id, "host_peer_id");
        assert_eq!(room.peers.len(), 1);
        assert!(room.contains("host_peer_id"));
    }

    #[tokio::test]
    async fn test_create_room_error() {
        let transport = TcpTransport::new();

        let result = transport.create_room(Peer::default());
        assert_matches!(result, Err(CollabError::Validation { .. }));
        assert!(transport.get_all_rooms().is_empty());
    }

    #[tokio::test]
    async fn test_join_room() {
        let transport = TcpTransport::new();
        let room_id = transport.create_room(host()).unwrap();
        let peer = Peer::with_id("peer1");

        transport.join_room(&room_id, peer.clone()).unwrap();

        let err = transport.join_room(&room_id, peer.clone()).unwrap_err();
        assert_eq!(err.to_string(), format!("peer peer1 is already in room {}", room_id));
        assert_eq!(transport.get_all_rooms()[&room_id].peers.len(), 2);

        let err = transport.join_room("nonexistent", peer).unwrap_err();
        assert_eq!(err.to_string(), "room nonexistent does not exist");
    }

    #[tokio::test]
    async fn test_leave_room() {
        let transport = TcpTransport::new();
        let room_id = transport.create_room(host()).unwrap();
        transport.join_room(&room_id, Peer::with_id("peer1")).unwrap();

        transport.leave_room(&room_id, "peer1").unwrap();

        assert_matches!(
            transport.leave_room(&room_id, "peer1"),
            Err(CollabError::PeerNotInRoom { .. })
        );
        assert_matches!(
            transport.leave_room("nonexistent", "peer1"),
            Err(CollabError::RoomNotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_last_peer_leaving_removes_room() {
        let transport = TcpTransport::new();
        let host = Peer::new("h1", "Host", "h@x.com", "127.0.0.1:9000");
        let room_id = transport.create_room(host).unwrap();

        transport.join_room(&room_id, Peer::with_id("p1")).unwrap();
        transport.leave_room(&room_id, "h1").unwrap();
        let rooms = transport.get_all_rooms();
        assert!(rooms.contains_key(&room_id));
        assert!(rooms[&room_id].contains("p1"));

        transport.leave_room(&room_id, "p1").unwrap();
        assert!(!transport.get_all_rooms().contains_key(&room_id));
    }

    #[tokio::test]
    async fn test_get_all_rooms_is_a_snapshot() {
        let transport = TcpTransport::new();
        let room_id = transport.create_room(host()).unwrap();

        let before = transport.get_all_rooms();
        transport.join_room(&room_id, Peer::with_id("peer1")).unwrap();

        assert_eq!(before[&room_id].peers.len(), 1);
        assert_eq!(transport.get_all_rooms()[&room_id].peers.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins() {
        let transport = Arc::new(TcpTransport::new());
        let room_id = transport.create_room(host()).unwrap();

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let transport = Arc::clone(&transport);
                let room_id = room_id.clone();
                tokio::spawn(async move {
                    transport.join_room(&room_id, Peer::with_id(format!("peer{}", i)))
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(transport.get_all_rooms()[&room_id].peers.len(), 51);
    }

    #[tokio::test]
    async fn test_accepted_connection_attaches_to_peer() {
        let transport = TcpTransport::new();
        transport.listen("127.0.0.1:0").await.unwrap();
        let server_addr = transport.local_addr().await.unwrap();

        let client = TcpStream::connect(server_addr).await.unwrap();
        let client_addr = client.local_addr().unwrap();

        let mut attempts = 0;
        while !transport.pending_connections().contains(&client_addr) {
            attempts += 1;
            assert!(attempts < 100, "connection was never accepted");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let host = Peer::new("h1", "Host", "h@x.com", client_addr.to_string());
        let room_id = transport.create_room(host).unwrap();

        let room = transport.get_all_rooms().remove(&room_id).unwrap();
        let stored = &room.peers["h1"];
        assert!(stored.online);
        assert_eq!(
            stored.connection.as_ref().map(Connection::remote_addr),
            Some(client_addr)
        );
        assert!(transport.pending_connections().is_empty());

        transport.close().await.unwrap();
    }

    async fn wait_for(mut condition: impl FnMut() -> bool, what: &str) {
        for _ in 0..300 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {}", what);
    }

    async fn read_eof(client: &mut TcpStream) -> bool {
        let mut buf = [0u8; 16];
        matches!(
            tokio::time::timeout(Duration::from_secs(3), client.read(&mut buf)).await,
            Ok(Ok(0)) | Ok(Err(_))
        )
    }

    #[tokio::test]
    async fn test_claimed_stream_is_usable() {
        let transport = TcpTransport::new();
        transport.listen("127.0.0.1:0").await.unwrap();
        let server_addr = transport.local_addr().await.unwrap();

        let mut client = TcpStream::connect(server_addr).await.unwrap();
        let client_addr = client.local_addr().unwrap();
        wait_for(|| transport.pending_connections().contains(&client_addr), "accept").await;

        let host = Peer::new("h1", "Host", "h@x.com", client_addr.to_string());
        let room_id = transport.create_room(host).unwrap();
        let connection = transport.registry().get(&room_id).unwrap().peers["h1"]
            .connection
            .clone()
            .unwrap();

        let stream = connection.stream();
        let mut guard = tokio::time::timeout(Duration::from_secs(3), stream.lock())
            .await
            .expect("stream lock was not released");
        guard.write_all(b"welcome").await.unwrap();
        drop(guard);

        let mut buf = [0u8; 7];
        client.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"welcome");

        transport.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_host_stream_closed_after_host_leaves() {
        let transport = TcpTransport::new();
        transport.listen("127.0.0.1:0").await.unwrap();
        let server_addr = transport.local_addr().await.unwrap();

        let mut client = TcpStream::connect(server_addr).await.unwrap();
        let client_addr = client.local_addr().unwrap();
        wait_for(|| transport.pending_connections().contains(&client_addr), "accept").await;

        let host = Peer::new("h1", "Host", "h@x.com", client_addr.to_string());
        let room_id = transport.create_room(host).unwrap();
        transport.join_room(&room_id, Peer::with_id("p1")).unwrap();
        transport.leave_room(&room_id, "h1").unwrap();

        let room = transport.registry().get(&room_id).unwrap();
        assert_eq!(room.host.id, "h1");
        assert!(room.host.connection.is_none());
        drop(room);

        assert!(read_eof(&mut client).await, "host stream is still open");

        transport.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_disconnected_clients_leave_pending_table() {
        let transport = TcpTransport::new();
        transport.listen("127.0.0.1:0").await.unwrap();
        let server_addr = transport.local_addr().await.unwrap();

        let mut clients = Vec::new();
        for _ in 0..50 {
            clients.push(TcpStream::connect(server_addr).await.unwrap());
        }
        wait_for(|| transport.pending_connections().len() == 50, "50 pending connections").await;

        drop(clients);
        wait_for(|| transport.pending_connections().is_empty(), "pending table to drain").await;

        transport.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_pending_limit_rejects_extra_connections() {
        let transport = TcpTransport::new().with_pending_limit(2);
        transport.listen("127.0.0.1:0").await.unwrap();
        let server_addr = transport.local_addr().await.unwrap();

        let _first = TcpStream::connect(server_addr).await.unwrap();
        let _second = TcpStream::connect(server_addr).await.unwrap();
        wait_for(|| transport.pending_connections().len() == 2, "2 pending connections").await;

        let mut third = TcpStream::connect(server_addr).await.unwrap();
        assert!(read_eof(&mut third).await, "extra connection was kept");
        assert_eq!(transport.pending_connections().len(), 2);

        transport.close().await.unwrap();
        assert!(transport.pending_connections().is_empty());
    }

    #[tokio::test]
    async fn test_peer_without_connection_stays_offline() {
        let transport = TcpTransport::new();
        let room_id = transport.create_room(host()).unwrap();

        let peer = Peer::new("p1", "Peer", "p@x.com", "not-an-address");
        transport.join_room(&room_id, peer).unwrap();

        let room = transport.get_all_rooms().remove(&room_id).unwrap();
        assert!(!room.peers["p1"].online);
        assert!(room.peers["p1"].connection.is_none());
    }
}
