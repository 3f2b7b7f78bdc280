//! Backend Module
//!
//! The HTTP server around the collaboration core. Only compiled with the
//! `ssr` feature.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - Router assembly and middleware
//! - **`rooms`** - Room lifecycle controllers
//! - **`chat`** - Chat controllers
//! - **`error`** - `BackendError` and its HTTP response mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - Server binary
//! ├── server/     - Initialization, state, config loading
//! ├── routes/     - Router
//! ├── rooms/      - Room handlers and bodies
//! ├── chat/       - Chat handlers and bodies
//! └── error/      - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds one `Arc<TcpTransport>` and a `ChatService` over the same
//! transport. Room state lives in the transport's registry; handlers never
//! hold a lock themselves.
//!
//! # Example
//!
//! ```rust,no_run
//! use codecollab::backend::server::create_app;
//! use codecollab::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let (app, _state) = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.api_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Room controllers
pub mod rooms;

/// Chat controllers
pub mod chat;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, AppState};
pub use error::BackendError;
