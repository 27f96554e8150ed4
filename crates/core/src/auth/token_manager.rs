//! Token manager
//!
//! Keeps a valid bearer credential on the shared [`RestClient`]:
//! - `authenticate` exchanges the client secrets for an access/refresh pair
//! - `refresh` trades the refresh token for a new access token
//! - `unauthenticate` drops the access token
//! - `ensure_authenticated` picks the cheapest of the above before a call
//!
//! Expiry is checked lazily on each call; nothing runs in the background.
//! The session lock is held across the token request, so concurrent callers
//! on one client wait for a single refresh instead of racing.

use chrono::{TimeDelta, Utc};
use nordigen_domain::constants::{TOKEN_NEW_PATH, TOKEN_REFRESH_PATH};
use nordigen_domain::{NordigenError, RefreshRequest, RefreshResponse, Result, TokensResponse};
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use super::{Credentials, Session};
use crate::ports::{HttpTransport, Method};
use crate::rest::client::AUTHORIZATION;
use crate::rest::RestClient;

/// Owns the credentials and the session, and keeps the REST client's
/// `Authorization` header in step with the session.
pub struct TokenManager {
    credentials: Credentials,
    session: Mutex<Session>,
}

impl TokenManager {
    /// Manager over an existing session.
    pub fn new(credentials: Credentials, session: Session) -> Self {
        Self { credentials, session: Mutex::new(session) }
    }

    /// Credentials used for authentication.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Copy of the current session state.
    pub fn session(&self) -> Session {
        self.session.lock().clone()
    }

    /// # Errors
    /// Returns `NordigenError::Config` if `buffer` is positive.
    pub fn set_expiration_buffer(&self, buffer: TimeDelta) -> Result<()> {
        self.session.lock().set_expiration_buffer(buffer)
    }

    /// Exchange the client secrets for a fresh token pair.
    ///
    /// Any current access token is discarded first, so a rejection leaves the
    /// session unauthenticated.
    #[instrument(skip_all)]
    pub fn authenticate<T: HttpTransport>(&self, rest: &RestClient<T>) -> Result<()> {
        let mut session = self.session.lock();
        self.authenticate_locked(&mut session, rest)
    }

    /// Obtain a new access token with the stored refresh token.
    ///
    /// # Errors
    /// - [`NordigenError::NoRefreshToken`] if no refresh token was ever issued
    /// - [`NordigenError::RefreshTokenExpired`] if it has lapsed
    ///
    /// Neither case touches the network.
    #[instrument(skip_all)]
    pub fn refresh<T: HttpTransport>(&self, rest: &RestClient<T>) -> Result<()> {
        let mut session = self.session.lock();
        Self::refresh_locked(&mut session, rest)
    }

    /// Drop the access token and remove the `Authorization` header. The
    /// refresh token is kept.
    pub fn unauthenticate<T: HttpTransport>(&self, rest: &RestClient<T>) {
        let mut session = self.session.lock();
        Self::clear_access(&mut session, rest);
        debug!("access token cleared");
    }

    /// Make sure the next request carries a valid access token.
    ///
    /// No network call when the current access token is still valid.
    #[instrument(skip_all)]
    pub fn ensure_authenticated<T: HttpTransport>(&self, rest: &RestClient<T>) -> Result<()> {
        let mut session = self.session.lock();
        let now = Utc::now();

        if session.has_valid_access(now) && rest.header(AUTHORIZATION).is_some() {
            return Ok(());
        }

        if session.has_refresh_token() && !session.refresh_expired(now) {
            return Self::refresh_locked(&mut session, rest);
        }

        self.authenticate_locked(&mut session, rest)
    }

    fn authenticate_locked<T: HttpTransport>(
        &self,
        session: &mut Session,
        rest: &RestClient<T>,
    ) -> Result<()> {
        Self::clear_access(session, rest);

        let request = self.credentials.token_request();
        let tokens: TokensResponse = rest.exec(Method::Post, TOKEN_NEW_PATH, Some(&request))?;

        let now = Utc::now();
        session.install_refresh(tokens.refresh, tokens.refresh_expires, now);
        Self::install_access(session, rest, tokens.access, tokens.access_expires);

        info!(
            access_expires_at = %session.access_expires_at(),
            refresh_expires_at = %session.refresh_expires_at(),
            "session authenticated"
        );
        Ok(())
    }

    fn refresh_locked<T: HttpTransport>(session: &mut Session, rest: &RestClient<T>) -> Result<()> {
        if !session.has_refresh_token() {
            return Err(NordigenError::NoRefreshToken);
        }
        if session.refresh_expired(Utc::now()) {
            return Err(NordigenError::RefreshTokenExpired);
        }

        Self::clear_access(session, rest);

        let request = RefreshRequest { refresh: session.refresh_token().to_string() };
        let refreshed: RefreshResponse =
            rest.exec(Method::Post, TOKEN_REFRESH_PATH, Some(&request))?;

        Self::install_access(session, rest, refreshed.access, refreshed.access_expires);

        info!(access_expires_at = %session.access_expires_at(), "access token refreshed");
        Ok(())
    }

    fn install_access<T: HttpTransport>(
        session: &mut Session,
        rest: &RestClient<T>,
        token: String,
        lifetime_secs: i64,
    ) {
        rest.set_header(AUTHORIZATION, format!("Bearer {token}"));
        session.install_access(token, lifetime_secs, Utc::now());
    }

    fn clear_access<T: HttpTransport>(session: &mut Session, rest: &RestClient<T>) {
        rest.remove_header(AUTHORIZATION);
        session.clear_access();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::ports::{HttpRequest, HttpResponse};

    const SECRET_ID: &str = "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5";

    #[derive(Default)]
    struct QueueTransport {
        responses: StdMutex<VecDeque<HttpResponse>>,
        requests: StdMutex<Vec<HttpRequest>>,
    }

    impl QueueTransport {
        fn push(&self, status: u16, body: &str) {
            self.responses.lock().unwrap().push_back(HttpResponse::new(status, body.as_bytes()));
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().iter().map(|r| r.url.clone()).collect()
        }
    }

    impl HttpTransport for QueueTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| NordigenError::Transport("no scripted response".to_string()))
        }
    }

    fn setup(buffer_secs: i64) -> (TokenManager, RestClient<QueueTransport>) {
        let credentials = Credentials::parse(SECRET_ID, "eafc3b").unwrap();
        let session = Session::new(TimeDelta::seconds(buffer_secs)).unwrap();
        let rest = RestClient::new(QueueTransport::default(), "https://example.test/api/v2");
        (TokenManager::new(credentials, session), rest)
    }

    const TOKENS: &str =
        r#"{"access":"access-1","access_expires":86400,"refresh":"refresh-1","refresh_expires":2592000}"#;

    #[test]
    fn test_authenticate_installs_tokens_and_header() {
        let (manager, rest) = setup(-60);
        rest.transport().push(200, TOKENS);
        let before = Utc::now();

        manager.authenticate(&rest).unwrap();

        let session = manager.session();
        assert_eq!(session.access_token(), "access-1");
        assert_eq!(session.refresh_token(), "refresh-1");
        assert!(session.access_expires_at() >= before + TimeDelta::seconds(86_400 - 60));
        assert!(session.refresh_expires_at() >= before + TimeDelta::seconds(2_592_000 - 60));
        assert!(session.access_expires_at() > Utc::now());
        assert_eq!(rest.header(AUTHORIZATION).as_deref(), Some("Bearer access-1"));
        assert_eq!(rest.transport().urls(), vec!["https://example.test/api/v2/token/new/"]);

        let sent = rest.transport().requests.lock().unwrap()[0].clone();
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"secret_id": SECRET_ID, "secret_key": "eafc3b"}));
        assert_eq!(sent.header(AUTHORIZATION), None);
    }

    #[test]
    fn test_authenticate_rejection_leaves_session_unauthenticated() {
        let (manager, rest) = setup(-60);
        rest.transport().push(200, TOKENS);
        manager.authenticate(&rest).unwrap();

        rest.transport().push(401, r#"{"summary":"Authentication failed","detail":"bad"}"#);
        let err = manager.authenticate(&rest).unwrap_err();

        assert!(err.is_unauthorized());
        assert!(manager.session().access_token().is_empty());
        assert_eq!(rest.header(AUTHORIZATION), None);
    }

    #[test]
    fn test_refresh_without_token_fails_offline() {
        let (manager, rest) = setup(-60);

        assert_eq!(manager.refresh(&rest).unwrap_err(), NordigenError::NoRefreshToken);
        assert_eq!(rest.transport().calls(), 0);
    }

    #[test]
    fn test_refresh_with_expired_token_fails_offline() {
        let (manager, rest) = setup(-60);
        rest.transport().push(
            200,
            r#"{"access":"a","access_expires":86400,"refresh":"r","refresh_expires":30}"#,
        );
        manager.authenticate(&rest).unwrap();

        assert_eq!(manager.refresh(&rest).unwrap_err(), NordigenError::RefreshTokenExpired);
        assert_eq!(rest.transport().calls(), 1);
    }

    #[test]
    fn test_refresh_replaces_access_only() {
        let (manager, rest) = setup(-60);
        rest.transport().push(200, TOKENS);
        rest.transport().push(200, r#"{"access":"access-2","access_expires":86400}"#);
        manager.authenticate(&rest).unwrap();
        let refresh_expiry = manager.session().refresh_expires_at();

        manager.refresh(&rest).unwrap();

        let session = manager.session();
        assert_eq!(session.access_token(), "access-2");
        assert_eq!(session.refresh_token(), "refresh-1");
        assert_eq!(session.refresh_expires_at(), refresh_expiry);
        assert_eq!(rest.header(AUTHORIZATION).as_deref(), Some("Bearer access-2"));

        let sent = rest.transport().requests.lock().unwrap()[1].clone();
        assert_eq!(sent.url, "https://example.test/api/v2/token/refresh");
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"refresh": "refresh-1"}));
    }

    #[test]
    fn test_ensure_authenticated_is_idempotent() {
        let (manager, rest) = setup(-60);
        rest.transport().push(200, TOKENS);

        for _ in 0..5 {
            manager.ensure_authenticated(&rest).unwrap();
        }

        assert_eq!(rest.transport().calls(), 1);
    }

    #[test]
    fn test_ensure_authenticated_prefers_refresh() {
        let (manager, rest) = setup(-60);
        rest.transport().push(
            200,
            r#"{"access":"a","access_expires":30,"refresh":"r","refresh_expires":86400}"#,
        );
        rest.transport().push(200, r#"{"access":"b","access_expires":86400}"#);

        manager.ensure_authenticated(&rest).unwrap();
        manager.ensure_authenticated(&rest).unwrap();

        assert_eq!(
            rest.transport().urls(),
            vec![
                "https://example.test/api/v2/token/new/",
                "https://example.test/api/v2/token/refresh"
            ]
        );
        assert_eq!(manager.session().access_token(), "b");
    }

    #[test]
    fn test_ensure_authenticated_falls_back_when_refresh_lapsed() {
        let (manager, rest) = setup(-60);
        rest.transport().push(
            200,
            r#"{"access":"a","access_expires":30,"refresh":"r","refresh_expires":30}"#,
        );
        rest.transport().push(200, TOKENS);

        manager.ensure_authenticated(&rest).unwrap();
        manager.ensure_authenticated(&rest).unwrap();

        let urls = rest.transport().urls();
        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|url| url.ends_with("/token/new/")));
    }

    #[test]
    fn test_unauthenticate_keeps_refresh_token() {
        let (manager, rest) = setup(-60);
        rest.transport().push(200, TOKENS);
        manager.authenticate(&rest).unwrap();

        manager.unauthenticate(&rest);

        let session = manager.session();
        assert!(session.access_token().is_empty());
        assert_eq!(session.refresh_token(), "refresh-1");
        assert_eq!(rest.header(AUTHORIZATION), None);
    }

    #[test]
    fn test_expiration_buffer_validated() {
        let (manager, _rest) = setup(0);
        assert!(manager.set_expiration_buffer(TimeDelta::seconds(10)).is_err());
        assert!(manager.set_expiration_buffer(TimeDelta::seconds(-10)).is_ok());
    }
}
