//! Authentication endpoint payloads.

use serde::{Deserialize, Serialize};

use super::HexBytes;

/// `POST /token/new/` body.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub secret_id: String,
    pub secret_key: HexBytes,
}

/// `POST /token/new/` response; expiries are lifetimes in seconds.
#[derive(Clone, Deserialize)]
pub struct TokensResponse {
    pub access: String,
    pub access_expires: i64,
    pub refresh: String,
    pub refresh_expires: i64,
}

/// `POST /token/refresh` body.
#[derive(Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// `POST /token/refresh` response. The refresh token is not rotated.
#[derive(Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    pub access_expires: i64,
}
