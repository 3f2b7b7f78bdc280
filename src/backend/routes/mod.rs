//! Routes Module
//!
//! Router assembly: every endpoint, the middleware stack and the 404
//! fallback.

/// Main router
pub mod router;

// Re-export commonly used functions
pub use router::create_router;
