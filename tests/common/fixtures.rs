//! Test fixtures

use codecollab::shared::Peer;

/// A peer with every field a host needs
pub fn host_peer(id: &str) -> Peer {
    Peer::new(
        id,
        format!("Peer {}", id),
        format!("{}@example.com", id),
        "127.0.0.1:9000",
    )
}

/// A peer that only carries an ID
pub fn bare_peer(id: &str) -> Peer {
    Peer::with_id(id)
}

/// Check the room ID format: 16 lowercase hex characters
pub fn is_room_id(id: &str) -> bool {
    id.len() == 16 && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

#[cfg(feature = "ssr")]
pub async fn test_server() -> (axum_test::TestServer, codecollab::backend::AppState) {
    use codecollab::backend::server::create_app;
    use codecollab::shared::AppConfig;

    let (app, state) = create_app(&AppConfig::default())
        .await
        .expect("Failed to create app");
    let server = axum_test::TestServer::new(app).expect("Failed to start test server");
    (server, state)
}
