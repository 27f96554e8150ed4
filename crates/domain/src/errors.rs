//! Error types used throughout the client

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Key the server repeats inside error bodies; the HTTP status line wins.
const STATUS_CODE_FIELD: &str = "status_code";

/// Broad classes of failure, used by callers deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed credentials or settings, raised while building a client
    Configuration,
    /// Network failure or a body that could not be encoded or decoded
    Transport,
    /// Structured non-2xx response from the server
    Api,
    /// Refresh impossible (no token, or token lapsed)
    Session,
}

/// Main error type for the Nordigen client
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum NordigenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("no refresh token configured")]
    NoRefreshToken,

    #[error("refresh token expired")]
    RefreshTokenExpired,
}

impl NordigenError {
    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Transport(_) | Self::Encode(_) | Self::Decode(_) => ErrorCategory::Transport,
            Self::Api(_) => ErrorCategory::Api,
            Self::NoRefreshToken | Self::RefreshTokenExpired => ErrorCategory::Session,
        }
    }

    /// HTTP status of an API error, `None` for every other kind.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status_code()),
            _ => None,
        }
    }

    /// True when the server answered 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_unauthorized())
    }

    /// Borrow the structured API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for Nordigen operations
pub type Result<T> = std::result::Result<T, NordigenError>;

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiErrorBody {
    /// Validation errors (400/404): free-form field name to detail mapping.
    Fields(BTreeMap<String, Value>),
    /// Every other status: a single summary with detail.
    Detail { summary: String, detail: String },
}

/// Structured API error carrying the HTTP status and server-provided detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    status_code: u16,
    body: ApiErrorBody,
}

#[derive(Deserialize)]
struct DetailWire {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    detail: String,
}

impl ApiError {
    pub fn new(status_code: u16, body: ApiErrorBody) -> Self {
        Self { status_code, body }
    }

    /// Classify a raw response.
    ///
    /// 400 and 404 bodies are read as a field mapping, everything else as
    /// `{summary, detail}`. Bodies that do not fit either shape are kept as
    /// raw text under the canonical reason phrase.
    pub fn from_response(status_code: u16, body: &[u8]) -> Self {
        let parsed = match status_code {
            400 | 404 => serde_json::from_slice::<BTreeMap<String, Value>>(body).ok().map(
                |mut fields| {
                    fields.remove(STATUS_CODE_FIELD);
                    ApiErrorBody::Fields(fields)
                },
            ),
            _ => serde_json::from_slice::<DetailWire>(body)
                .ok()
                .filter(|wire| !wire.summary.is_empty() || !wire.detail.is_empty())
                .map(|wire| ApiErrorBody::Detail { summary: wire.summary, detail: wire.detail }),
        };

        let body = parsed.unwrap_or_else(|| ApiErrorBody::Detail {
            summary: canonical_reason(status_code).to_string(),
            detail: String::from_utf8_lossy(body).trim().to_string(),
        });

        Self { status_code, body }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    pub fn body(&self) -> &ApiErrorBody {
        &self.body
    }

    /// Names of the fields reported by a validation error.
    pub fn fields(&self) -> Vec<&str> {
        match &self.body {
            ApiErrorBody::Fields(fields) => fields.keys().map(String::as_str).collect(),
            ApiErrorBody::Detail { .. } => Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.body {
            ApiErrorBody::Fields(fields) => fields.get(name),
            ApiErrorBody::Detail { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.body {
            ApiErrorBody::Detail { summary, .. } => Some(summary),
            ApiErrorBody::Fields(_) => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match &self.body {
            ApiErrorBody::Detail { detail, .. } => Some(detail),
            ApiErrorBody::Fields(_) => None,
        }
    }

    /// Human-readable message joined from every detail in the body.
    pub fn message(&self) -> String {
        match &self.body {
            ApiErrorBody::Fields(fields) => {
                fields.values().map(render_value).collect::<Vec<_>>().join("; ")
            }
            ApiErrorBody::Detail { summary, detail } => join_summary(summary, detail),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.status_code, self.message())
    }
}

impl std::error::Error for ApiError {}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(", "),
        Value::Object(map) => {
            let summary = map.get("summary").and_then(Value::as_str).unwrap_or_default();
            let detail = map.get("detail").and_then(Value::as_str).unwrap_or_default();
            if summary.is_empty() && detail.is_empty() {
                value.to_string()
            } else {
                join_summary(summary, detail)
            }
        }
        other => other.to_string(),
    }
}

fn join_summary(summary: &str, detail: &str) -> String {
    match (summary.is_empty(), detail.is_empty()) {
        (false, false) => format!("{summary}: {detail}"),
        (false, true) => summary.to_string(),
        (true, _) => detail.to_string(),
    }
}

fn canonical_reason(status_code: u16) -> &'static str {
    match status_code {
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unexpected Status",
    }
}
