/**
 * Server Binary
 *
 * Loads `.env`, reads the configuration, installs the tracing subscriber
 * and serves the HTTP API until Ctrl-C. On shutdown the TCP transport is
 * closed so its port is released.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use codecollab::backend::server::{config::load_config, init::create_app};
    use codecollab::network::Transport;

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .init();

    tracing::info!("[Server] Starting with log filter {}", config.log_filter);

    let (app, state) = create_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.api_addr).await?;
    tracing::info!("[Server] HTTP API listening on {}", config.api_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.transport.close().await?;
    tracing::info!("[Server] Shut down");

    Ok(())
}

#[cfg(feature = "ssr")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[Server] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[Server] Shutdown signal received");
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin codecollab-server --features ssr");
    std::process::exit(1);
}
