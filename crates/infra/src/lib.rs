//! # Nordigen Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The blocking `reqwest` transport
//! - Configuration loading (environment, `.env`, TOML/JSON files)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `nordigen-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

use nordigen_core::Nordigen;
use nordigen_domain::{NordigenConfig, Result};

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{ReqwestTransport, ReqwestTransportBuilder};
pub use observability::init_tracing;

/// Client over the `reqwest` transport, configured from `config`.
///
/// # Errors
/// Returns `NordigenError::Config` for an invalid configuration or
/// malformed credentials, `NordigenError::Transport` if the HTTP client
/// cannot be built.
pub fn connect(config: &NordigenConfig) -> Result<Nordigen<ReqwestTransport>> {
    config.validate()?;
    let transport = ReqwestTransport::builder().timeout(config.timeout()).build()?;
    Nordigen::from_config(config, transport)
}

/// [`connect`] with the configuration from [`config::load`].
///
/// # Errors
/// Same as [`config::load`] and [`connect`].
pub fn connect_default() -> Result<Nordigen<ReqwestTransport>> {
    connect(&config::load()?)
}
