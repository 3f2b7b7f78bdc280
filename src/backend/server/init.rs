/**
 * Server Initialization
 *
 * Builds the application state and the axum router from an `AppConfig`.
 *
 * # Initialization Steps
 *
 * 1. Create the TCP transport (with its own room registry)
 * 2. Start the transport listener if `transport_addr` is configured
 * 3. Create the chat service over the transport
 * 4. Build the router with all routes and middleware
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::network::{TcpTransport, Transport};
use crate::shared::AppConfig;

/// Create the application state
///
/// Fails if the configured transport address cannot be bound.
pub async fn create_state(config: &AppConfig) -> Result<AppState, BackendError> {
    let transport = Arc::new(TcpTransport::new());

    if let Some(addr) = &config.transport_addr {
        transport.listen(addr).await?;
    } else {
        tracing::info!("[Server] TRANSPORT_ADDR not set, peer connections are disabled");
    }

    Ok(AppState::new(transport))
}

/// Create the application router together with its state
///
/// The state is returned as well so the caller can close the transport on
/// shutdown.
pub async fn create_app(config: &AppConfig) -> Result<(Router<()>, AppState), BackendError> {
    tracing::info!("[Server] Initializing collaboration backend");

    let state = create_state(config).await?;
    let app = create_router(state.clone());

    tracing::info!("[Server] Router configured");
    Ok((app, state))
}
