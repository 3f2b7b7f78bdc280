//! Common test utilities and helpers
//!
//! - Peer fixtures
//! - Test server construction (with `ssr`)
//! - Custom assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod fixtures;

pub use fixtures::*;
