//! Conversions from external infrastructure errors into domain errors.

use nordigen_domain::{ApiError, NordigenError};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub NordigenError);

impl From<InfraError> for NordigenError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<NordigenError> for InfraError {
    fn from(value: NordigenError) -> Self {
        InfraError(value)
    }
}

trait IntoNordigenError {
    fn into_nordigen(self) -> NordigenError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → NordigenError */
/* -------------------------------------------------------------------------- */

impl IntoNordigenError for HttpError {
    fn into_nordigen(self) -> NordigenError {
        if self.is_timeout() {
            return NordigenError::Transport(format!("request timed out: {self}"));
        }

        if self.is_connect() {
            return NordigenError::Transport(format!("connection failed: {self}"));
        }

        // Only produced by `error_for_status`; the body is gone by then.
        if let Some(status) = self.status() {
            return NordigenError::Api(ApiError::from_response(status.as_u16(), &[]));
        }

        if self.is_builder() {
            return NordigenError::Transport(format!("invalid request: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return NordigenError::Transport(format!("failed to read response body: {self}"));
        }

        NordigenError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_nordigen())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
