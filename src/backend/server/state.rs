/**
 * Application State Management
 *
 * `AppState` holds the TCP transport and the chat service built on it.
 * Both are cheap to clone (`Arc` inside), so axum clones the state per
 * request.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State(transport): State<Arc<TcpTransport>>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::chat::ChatService;
use crate::network::TcpTransport;

/// Shared state of the HTTP server
#[derive(Clone)]
pub struct AppState {
    /// Transport realizing the rooms
    pub transport: Arc<TcpTransport>,

    /// Chat over the same transport
    pub chat: ChatService<TcpTransport>,
}

impl AppState {
    pub fn new(transport: Arc<TcpTransport>) -> Self {
        let chat = ChatService::new(Arc::clone(&transport));
        Self { transport, chat }
    }
}

impl FromRef<AppState> for Arc<TcpTransport> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.transport.clone()
    }
}

impl FromRef<AppState> for ChatService<TcpTransport> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat.clone()
    }
}
