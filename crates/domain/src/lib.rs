//! # Nordigen Domain
//!
//! Wire types and the error taxonomy for the Nordigen open-banking client.
//!
//! This crate contains:
//! - Request/response shapes for accounts, institutions, agreements and
//!   requisitions
//! - The error type and `Result` alias shared by every other crate
//! - Client configuration structures
//! - API constants (base URL, default buffers and page sizes)
//!
//! ## Architecture
//! - No dependencies on other Nordigen crates
//! - Only external dependencies allowed
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
