//! Server Module
//!
//! Server initialization, application state and configuration loading.
//!
//! # Architecture
//!
//! - **`state`** - `AppState` (transport + chat service) and `FromRef` impls
//! - **`config`** - `load_config()` from the process environment
//! - **`init`** - builds the state and the router from an `AppConfig`

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{create_app, create_state};
