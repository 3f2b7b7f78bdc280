//! Application configuration module
//!
//! Provides configuration types for the server: where the HTTP API is
//! served, where (if anywhere) the TCP transport listens for peer
//! connections, and the default log filter.

use std::net::SocketAddr;
use thiserror::Error;

/// Default HTTP API address
pub const DEFAULT_API_ADDR: &str = "0.0.0.0:8080";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP API binds to
    pub api_addr: SocketAddr,
    /// Address the TCP transport listens on at startup
    pub transport_addr: Option<String>,
    /// `tracing-subscriber` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(addr) = &self.transport_addr {
            if addr.trim().is_empty() {
                return Err(ConfigError::MissingValue("transport_addr"));
            }
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::MissingValue("log_filter"));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            transport_addr: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_addr: Option<String>,
    transport_addr: Option<String>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Set the HTTP API address (`host:port`)
    pub fn api_addr(mut self, addr: impl Into<String>) -> Self {
        self.api_addr = Some(addr.into());
        self
    }

    /// Set the TCP transport listen address (`host:port`)
    pub fn transport_addr(mut self, addr: impl Into<String>) -> Self {
        self.transport_addr = Some(addr.into());
        self
    }

    /// Set the default log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_addr = self
            .api_addr
            .unwrap_or_else(|| DEFAULT_API_ADDR.to_string());
        let api_addr = api_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress(api_addr))?;

        let config = AppConfig {
            api_addr,
            transport_addr: self.transport_addr,
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
