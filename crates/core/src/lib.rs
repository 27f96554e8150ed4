//! # Nordigen Core
//!
//! Client mechanics with no concrete HTTP stack.
//!
//! This crate contains:
//! - The transport port ([`HttpTransport`]) and the JSON REST executor
//! - Token lifecycle management (authenticate, refresh, expiry bookkeeping)
//! - The re-authenticate-once call policy shared by every resource
//! - The paged collection cursor for `{count, results}` listings
//! - Typed accessors for accounts, institutions, agreements and requisitions
//!
//! ## Architecture Principles
//! - Only depends on `nordigen-domain`
//! - All network I/O goes through [`HttpTransport`]
//! - Everything is blocking

pub mod auth;
pub mod client;
pub mod collection;
pub mod ports;
pub mod resource;
pub mod resources;
pub mod rest;

pub use auth::{Credentials, Session, SessionState, TokenManager};
pub use client::{Nordigen, NordigenBuilder};
pub use collection::CollectionCursor;
pub use ports::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use resource::NordigenResource;
pub use resources::{
    AccountDetailsResource, AccountResource, AgreementResource, BalanceResource,
    InstitutionResource, RequisitionResource, TransactionResource,
};
pub use rest::{GenericResource, QueryParams, RestClient};
