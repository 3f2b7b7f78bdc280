/**
 * Configuration Loading
 *
 * Reads the server configuration from the process environment. The binary
 * loads `.env` with `dotenv` before calling `load_config`.
 *
 * # Environment Variables
 *
 * - `API_ADDR` - HTTP API address (default `0.0.0.0:8080`)
 * - `TRANSPORT_ADDR` - TCP transport listen address (optional; when unset the
 *   transport does not listen)
 * - `RUST_LOG` - log filter (default `info`)
 */

use crate::shared::{AppConfig, ConfigError};

/// Load the configuration from the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load the configuration through an arbitrary variable lookup
pub fn load_config_from<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = AppConfig::builder();

    if let Some(addr) = lookup("API_ADDR") {
        builder = builder.api_addr(addr);
    }
    if let Some(addr) = lookup("TRANSPORT_ADDR") {
        builder = builder.transport_addr(addr);
    }
    if let Some(filter) = lookup("RUST_LOG") {
        builder = builder.log_filter(filter);
    }

    let config = builder.build()?;
    tracing::debug!(
        "[Server] Configuration loaded: api_addr={}, transport_addr={:?}",
        config.api_addr,
        config.transport_addr
    );
    Ok(config)
}
