//! JSON REST executor
//!
//! Resolves paths against the base URL, attaches the shared headers, encodes
//! request bodies and decodes 2xx responses. Non-2xx responses become
//! [`ApiError`]s carrying the HTTP status.

use std::collections::BTreeMap;

use nordigen_domain::constants::CONTENT_TYPE_JSON;
use nordigen_domain::{ApiError, NordigenError, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::ports::{HttpRequest, HttpTransport, Method};

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";

/// Shared REST client. Headers are mutable so the token manager can swap the
/// bearer credential in place for every resource built from the same client.
pub struct RestClient<T> {
    transport: T,
    base_url: String,
    headers: RwLock<BTreeMap<String, String>>,
}

impl<T: HttpTransport> RestClient<T> {
    /// Client over `transport`; a trailing `/` on `base_url` is dropped.
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string());

        Self { transport, base_url, headers: RwLock::new(headers) }
    }

    /// Versioned API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Transport requests go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Add or replace a header sent with every request.
    pub fn set_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.write().insert(name.into(), value.into());
    }

    /// Remove a shared header, returning its old value.
    pub fn remove_header(&self, name: &str) -> Option<String> {
        self.headers.write().remove(name)
    }

    /// Current value of a shared header.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.read().get(name).cloned()
    }

    /// Perform one request against `path` (relative to the base URL, query
    /// string included) and decode the JSON response into `R`.
    ///
    /// An empty 2xx body decodes as JSON `null`.
    ///
    /// # Errors
    /// - [`NordigenError::Encode`] if `body` cannot be serialized
    /// - [`NordigenError::Transport`] if the transport fails
    /// - [`NordigenError::Api`] for any non-2xx status
    /// - [`NordigenError::Decode`] if the response does not fit `R`
    pub fn exec<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| NordigenError::Encode(format!("{method} {path}: {e}")))?;

        let headers =
            self.headers.read().iter().map(|(name, value)| (name.clone(), value.clone())).collect();

        let request =
            HttpRequest { method, url: format!("{}{}", self.base_url, path), headers, body };

        debug!(%method, path, "sending request");

        let response = self.transport.execute(request).map_err(|err| match err {
            NordigenError::Transport(message) => {
                NordigenError::Transport(format!("{method} {path}: {message}"))
            }
            other => other,
        })?;

        debug!(%method, path, status = response.status, "received response");

        if !response.is_success() {
            return Err(ApiError::from_response(response.status, &response.body).into());
        }

        decode_body(&response.body).map_err(|e| {
            NordigenError::Decode(format!(
                "{method} {path} response into {}: {e}",
                std::any::type_name::<R>()
            ))
        })
    }
}

fn decode_body<R: DeserializeOwned>(body: &[u8]) -> serde_json::Result<R> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    }
}
