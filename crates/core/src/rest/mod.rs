//! JSON REST execution over an [`HttpTransport`](crate::ports::HttpTransport).

pub mod client;
pub mod query;
pub mod resource;

pub use client::RestClient;
pub use query::QueryParams;
pub use resource::GenericResource;
