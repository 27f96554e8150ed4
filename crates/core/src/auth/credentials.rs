//! Client credentials

use std::fmt;

use nordigen_domain::{HexBytes, NordigenError, Result, TokenRequest};
use uuid::Uuid;

/// Secret id and secret key issued for the API. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    secret_id: Uuid,
    secret_key: HexBytes,
}

impl Credentials {
    /// # Errors
    /// Returns `NordigenError::Config` if the key is empty.
    pub fn new(secret_id: Uuid, secret_key: HexBytes) -> Result<Self> {
        if secret_key.is_empty() {
            return Err(NordigenError::Config("secret key must not be empty".to_string()));
        }
        Ok(Self { secret_id, secret_key })
    }

    /// Parse the textual form: a UUID and a hex-encoded key.
    ///
    /// # Errors
    /// Returns `NordigenError::Config` if the id is not a UUID or the key is
    /// empty or not valid hex.
    pub fn parse(secret_id: &str, secret_key: &str) -> Result<Self> {
        let secret_id = Uuid::parse_str(secret_id.trim())
            .map_err(|e| NordigenError::Config(format!("invalid secret id: {e}")))?;
        let secret_key: HexBytes = secret_key.trim().parse()?;

        Self::new(secret_id, secret_key)
    }

    /// Secret id issued with the key.
    pub fn secret_id(&self) -> Uuid {
        self.secret_id
    }

    /// Secret key bytes.
    pub fn secret_key(&self) -> &HexBytes {
        &self.secret_key
    }

    pub(crate) fn token_request(&self) -> TokenRequest {
        TokenRequest { secret_id: self.secret_id.to_string(), secret_key: self.secret_key.clone() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
