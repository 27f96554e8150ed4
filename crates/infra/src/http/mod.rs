//! Concrete HTTP transport

mod client;

pub use client::{ReqwestTransport, ReqwestTransportBuilder};
