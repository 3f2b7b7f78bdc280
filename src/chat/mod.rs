//! Chat Module
//!
//! Room chat built on top of a transport's registry. Messages are rendered
//! to history lines (`[dd-mm-YYYY] <sender>: <content>`) and appended to the
//! room; reading returns a copy of the history.

/// Chat send/receive over a transport
pub mod service;

pub use service::ChatService;
