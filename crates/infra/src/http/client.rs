//! Blocking `reqwest` implementation of [`HttpTransport`].

use std::time::Duration;

use nordigen_core::{HttpRequest, HttpResponse, HttpTransport, Method};
use nordigen_domain::constants::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
use nordigen_domain::Result;
use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::errors::InfraError;

/// Blocking [`HttpTransport`] backed by `reqwest`.
///
/// Every response the server sends comes back as `Ok`, whatever its status;
/// status handling belongs to the REST layer.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Wrap an already configured client.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest { method, url, headers, body } = request;

        let mut builder = self.client.request(to_reqwest(method), url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(InfraError::from)?;
        let status = response.status();
        debug!(%method, %status, "transport exchange complete");

        let body = response.bytes().map_err(InfraError::from)?;
        Ok(HttpResponse::new(status.as_u16(), body.to_vec()))
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    user_agent: String,
    default_headers: Option<HeaderMap>,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            default_headers: None,
        }
    }
}

impl ReqwestTransportBuilder {
    /// Whole-request timeout, connect through body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Headers added to every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    /// Returns `NordigenError::Transport` if the TLS backend cannot be
    /// initialised.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).user_agent(self.user_agent);

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(InfraError::from)?;
        Ok(ReqwestTransport { client })
    }
}
