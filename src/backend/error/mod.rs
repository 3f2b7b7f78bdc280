//! Backend Error Module
//!
//! Error types of the HTTP layer. Every handler returns
//! `Result<_, BackendError>`; the error converts itself into a JSON response
//! with the matching status code.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and its status code mapping
//! - **`conversion`** - `IntoResponse` and request rejection conversions
//!
//! # Status Codes
//!
//! | Error | Status |
//! |---|---|
//! | malformed body, `Validation`, `Bind` | 400 |
//! | `RoomNotFound`, `PeerNotInRoom` | 404 |
//! | `PeerAlreadyInRoom` | 409 |
//! | `Unsupported` | 501 |
//! | `RandomSource`, `Serialization` | 500 |

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
