//! Session token bookkeeping
//!
//! Holds the access and refresh tokens with their buffered expiries. All
//! expiries are absolute UTC timestamps; a fresh session has both set to the
//! Unix epoch and an empty refresh token.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use nordigen_domain::{NordigenError, Result};

/// Coarse view of the session, derived from tokens and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No usable access token and no usable refresh token
    Unauthenticated,
    /// Access token present and not yet expired
    Authenticated,
    /// Access token gone or expired, refresh token still valid
    AccessExpiredRefreshValid,
}

/// Access and refresh tokens with their expiries.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    access_expires_at: DateTime<Utc>,
    refresh_token: String,
    refresh_expires_at: DateTime<Utc>,
    expiration_buffer: TimeDelta,
}

impl Session {
    /// Start unauthenticated with the given expiry buffer.
    ///
    /// # Errors
    /// Returns `NordigenError::Config` if `expiration_buffer` is positive.
    pub fn new(expiration_buffer: TimeDelta) -> Result<Self> {
        validate_buffer(expiration_buffer)?;
        Ok(Self {
            access_token: String::new(),
            access_expires_at: DateTime::<Utc>::UNIX_EPOCH,
            refresh_token: String::new(),
            refresh_expires_at: DateTime::<Utc>::UNIX_EPOCH,
            expiration_buffer,
        })
    }

    /// Offset applied to every server-reported lifetime.
    pub fn expiration_buffer(&self) -> TimeDelta {
        self.expiration_buffer
    }

    /// # Errors
    /// Returns `NordigenError::Config` if `buffer` is positive.
    pub fn set_expiration_buffer(&mut self, buffer: TimeDelta) -> Result<()> {
        validate_buffer(buffer)?;
        self.expiration_buffer = buffer;
        Ok(())
    }

    /// Empty when no access token is held.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Absolute expiry of the access token, buffer applied.
    pub fn access_expires_at(&self) -> DateTime<Utc> {
        self.access_expires_at
    }

    /// Empty until the first successful authentication.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Absolute expiry of the refresh token, buffer applied.
    pub fn refresh_expires_at(&self) -> DateTime<Utc> {
        self.refresh_expires_at
    }

    /// Whether an access token is held and has not expired at `now`.
    pub fn has_valid_access(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && self.access_expires_at > now
    }

    /// Whether a refresh token was ever issued.
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Whether the refresh token has lapsed at `now`.
    pub fn refresh_expired(&self, now: DateTime<Utc>) -> bool {
        self.refresh_expires_at <= now
    }

    /// Session state at `now`.
    pub fn state(&self, now: DateTime<Utc>) -> SessionState {
        if self.has_valid_access(now) {
            SessionState::Authenticated
        } else if self.has_refresh_token() && !self.refresh_expired(now) {
            SessionState::AccessExpiredRefreshValid
        } else {
            SessionState::Unauthenticated
        }
    }

    pub(crate) fn install_access(&mut self, token: String, lifetime_secs: i64, now: DateTime<Utc>) {
        self.access_token = token;
        self.access_expires_at = self.buffered_expiry(now, lifetime_secs);
    }

    pub(crate) fn install_refresh(&mut self, token: String, lifetime_secs: i64, now: DateTime<Utc>) {
        self.refresh_token = token;
        self.refresh_expires_at = self.buffered_expiry(now, lifetime_secs);
    }

    /// Drop the access token; the refresh token is kept.
    pub(crate) fn clear_access(&mut self) {
        self.access_token.clear();
        self.access_expires_at = DateTime::<Utc>::UNIX_EPOCH;
    }

    fn buffered_expiry(&self, now: DateTime<Utc>, lifetime_secs: i64) -> DateTime<Utc> {
        let saturated =
            if lifetime_secs < 0 { DateTime::<Utc>::UNIX_EPOCH } else { DateTime::<Utc>::MAX_UTC };

        TimeDelta::try_seconds(lifetime_secs)
            .and_then(|lifetime| lifetime.checked_add(&self.expiration_buffer))
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(saturated)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_access_token", &!self.access_token.is_empty())
            .field("access_expires_at", &self.access_expires_at)
            .field("has_refresh_token", &!self.refresh_token.is_empty())
            .field("refresh_expires_at", &self.refresh_expires_at)
            .field("expiration_buffer", &self.expiration_buffer)
            .finish()
    }
}

fn validate_buffer(buffer: TimeDelta) -> Result<()> {
    if buffer > TimeDelta::zero() {
        return Err(NordigenError::Config(format!(
            "token expiration buffer must be zero or negative, got {}s",
            buffer.num_seconds()
        )));
    }
    Ok(())
}
