//! API constants
//!
//! Centralized location for the defaults used when building a client.

// Endpoint
pub const DEFAULT_BASE_URL: &str = "https://ob.nordigen.com/api";
pub const API_VERSION: &str = "v2";

// Authentication endpoints (relative to the versioned base URL)
pub const TOKEN_NEW_PATH: &str = "/token/new/";
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh";

// Session bookkeeping
/// Server-declared expiries are shortened by this many seconds.
pub const DEFAULT_TOKEN_EXPIRATION_BUFFER_SECS: i64 = -60;

// Transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const USER_AGENT: &str = concat!("nordigen-rs/", env!("CARGO_PKG_VERSION"));

// Listing
pub const DEFAULT_PAGE_SIZE: usize = 1000;
pub const LIMIT_PARAM: &str = "limit";
pub const OFFSET_PARAM: &str = "offset";

/// Date format used by transaction range filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full default base URL including the API version segment.
pub fn default_base_url() -> String {
    format!("{DEFAULT_BASE_URL}/{API_VERSION}")
}
