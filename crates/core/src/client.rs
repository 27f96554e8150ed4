//! Client facade
//!
//! [`Nordigen`] owns the REST client and the token manager. Every typed
//! resource and every collection cursor borrows it, so a refresh done by one
//! call is seen by all later calls through the same client.

use chrono::TimeDelta;
use nordigen_domain::constants::{
    default_base_url, DEFAULT_PAGE_SIZE, DEFAULT_TOKEN_EXPIRATION_BUFFER_SECS,
};
use nordigen_domain::{NordigenConfig, NordigenError, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::auth::{Credentials, Session, TokenManager};
use crate::collection::CollectionCursor;
use crate::ports::HttpTransport;
use crate::resources::{AccountResource, AgreementResource, InstitutionResource, RequisitionResource};
use crate::rest::{QueryParams, RestClient};

/// Nordigen API client over the transport `T`.
pub struct Nordigen<T> {
    rest: RestClient<T>,
    tokens: TokenManager,
    page_size: usize,
}

impl Nordigen<()> {
    /// Start building a new client. The transport is supplied to
    /// [`NordigenBuilder::build`].
    pub fn builder() -> NordigenBuilder {
        NordigenBuilder::new()
    }
}

impl<T: HttpTransport> Nordigen<T> {
    /// Client with default settings against the production API.
    ///
    /// # Errors
    /// Returns `NordigenError::Config` for malformed credentials.
    pub fn new(transport: T, secret_id: &str, secret_key: &str) -> Result<Self> {
        NordigenBuilder::new().secret_id(secret_id).secret_key(secret_key).build(transport)
    }

    /// # Errors
    /// Returns `NordigenError::Config` if the configuration is invalid.
    pub fn from_config(config: &NordigenConfig, transport: T) -> Result<Self> {
        config.validate()?;
        NordigenBuilder::new()
            .secret_id(&config.secret_id)
            .secret_key(&config.secret_key)
            .base_url(&config.base_url)
            .token_expiration_buffer_secs(config.token_expiration_buffer_secs)
            .page_size(config.page_size)
            .build(transport)
    }

    /// Underlying REST client.
    pub fn rest(&self) -> &RestClient<T> {
        &self.rest
    }

    /// Token manager holding the session.
    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Page size used by collection cursors.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Obtain a fresh token pair from the credentials.
    ///
    /// # Errors
    /// Returns the token endpoint's failure; the session is left
    /// unauthenticated.
    pub fn authenticate(&self) -> Result<()> {
        self.tokens.authenticate(&self.rest)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// # Errors
    /// `NordigenError::NoRefreshToken` or `NordigenError::RefreshTokenExpired`
    /// without a usable refresh token, otherwise the token endpoint's failure.
    pub fn refresh(&self) -> Result<()> {
        self.tokens.refresh(&self.rest)
    }

    /// Drop the access token and the `Authorization` header.
    pub fn unauthenticate(&self) {
        self.tokens.unauthenticate(&self.rest);
    }

    /// Make sure a usable access token is installed, refreshing or logging
    /// in as needed.
    ///
    /// # Errors
    /// Returns the failed refresh or login.
    pub fn ensure_authenticated(&self) -> Result<()> {
        self.tokens.ensure_authenticated(&self.rest)
    }

    /// Run one API call under the re-authentication policy.
    ///
    /// The session is validated first. If `call` answers 401, the access
    /// token is dropped, the session is re-established and `call` runs exactly
    /// once more; that second outcome is final. Other failures return
    /// immediately.
    pub fn with_reauth<R>(&self, mut call: impl FnMut() -> Result<R>) -> Result<R> {
        self.ensure_authenticated()?;

        match call() {
            Err(err) if err.is_unauthorized() => {
                warn!(error = %err, "unauthorized response, re-authenticating once");
                self.unauthenticate();
                self.ensure_authenticated()?;
                call()
            }
            outcome => outcome,
        }
    }

    /// Cursor over any `{count, results}` listing, using the configured page
    /// size. Fetches the first page immediately.
    pub fn collection<R: DeserializeOwned>(
        &self,
        path: impl Into<String>,
        filters: QueryParams,
    ) -> Result<CollectionCursor<'_, R, T>> {
        CollectionCursor::open(self, path.into(), filters, self.page_size)
    }

    /// Account endpoints.
    pub fn accounts(&self) -> AccountResource<'_, T> {
        AccountResource::new(self)
    }

    /// Institution endpoints.
    pub fn institutions(&self) -> InstitutionResource<'_, T> {
        InstitutionResource::new(self)
    }

    /// End-user agreement endpoints.
    pub fn agreements(&self) -> AgreementResource<'_, T> {
        AgreementResource::new(self)
    }

    /// Requisition endpoints.
    pub fn requisitions(&self) -> RequisitionResource<'_, T> {
        RequisitionResource::new(self)
    }
}

/// Builder for [`Nordigen`].
pub struct NordigenBuilder {
    secret_id: Option<String>,
    secret_key: Option<String>,
    credentials: Option<Credentials>,
    base_url: String,
    token_expiration_buffer: TimeDelta,
    page_size: usize,
}

impl Default for NordigenBuilder {
    fn default() -> Self {
        Self {
            secret_id: None,
            secret_key: None,
            credentials: None,
            base_url: default_base_url(),
            token_expiration_buffer: TimeDelta::seconds(DEFAULT_TOKEN_EXPIRATION_BUFFER_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl NordigenBuilder {
    /// Builder with default base URL, expiry buffer and page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Secret id as UUID text.
    pub fn secret_id(mut self, secret_id: impl Into<String>) -> Self {
        self.secret_id = Some(secret_id.into());
        self
    }

    /// Secret key as hex text.
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Already-parsed credentials; takes precedence over the text setters.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Versioned API root, e.g. `https://ob.nordigen.com/api/v2`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Must be zero or negative.
    pub fn token_expiration_buffer(mut self, buffer: TimeDelta) -> Self {
        self.token_expiration_buffer = buffer;
        self
    }

    /// [`token_expiration_buffer`](Self::token_expiration_buffer) in seconds.
    pub fn token_expiration_buffer_secs(self, seconds: i64) -> Self {
        let buffer = TimeDelta::try_seconds(seconds).unwrap_or(TimeDelta::MAX);
        self.token_expiration_buffer(buffer)
    }

    /// Items requested per page; at least 1.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the client over `transport`.
    ///
    /// # Errors
    /// Returns `NordigenError::Config` for missing or malformed credentials,
    /// a positive expiry buffer, or a zero page size.
    pub fn build<T: HttpTransport>(self, transport: T) -> Result<Nordigen<T>> {
        let credentials = match self.credentials {
            Some(credentials) => credentials,
            None => {
                let secret_id = self
                    .secret_id
                    .ok_or_else(|| NordigenError::Config("secret id is required".to_string()))?;
                let secret_key = self
                    .secret_key
                    .ok_or_else(|| NordigenError::Config("secret key is required".to_string()))?;
                Credentials::parse(&secret_id, &secret_key)?
            }
        };

        if self.page_size == 0 {
            return Err(NordigenError::Config("page size must be at least 1".to_string()));
        }

        let session = Session::new(self.token_expiration_buffer)?;

        Ok(Nordigen {
            rest: RestClient::new(transport, self.base_url),
            tokens: TokenManager::new(credentials, session),
            page_size: self.page_size,
        })
    }
}
