//! Credentials and session token lifecycle

pub mod credentials;
pub mod session;
pub mod token_manager;

pub use credentials::Credentials;
pub use session::{Session, SessionState};
pub use token_manager::TokenManager;
