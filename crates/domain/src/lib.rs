//! # Unisphere Domain
//!
//! Typed payload model and error taxonomy for the Unisphere REST API.
//!
//! This crate contains:
//! - Request and response records mirroring the array's JSON schema
//! - The structured error envelope the array returns on failures
//! - Error types and the crate-wide `Result` definition
//!
//! ## Architecture
//! - No dependency on the transport crate
//! - Only serde and thiserror as external dependencies
//! - Pure data structures, no I/O

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
