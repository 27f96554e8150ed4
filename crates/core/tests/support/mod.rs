//! Shared test helpers for `nordigen-core` integration tests.
//!
//! [`ScriptedTransport`] stands in for the network: responses are queued per
//! method and path, and every request is recorded so tests can count exactly
//! how many calls each endpoint received.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use nordigen_core::{HttpRequest, HttpResponse, HttpTransport, Method, Nordigen};
use nordigen_domain::{NordigenError, Result};

pub const BASE_URL: &str = "https://ob.test/api/v2";
pub const SECRET_ID: &str = "9a7ae8ea-13d5-4f7e-b5b8-b1e6e6ff8bb5";
pub const SECRET_KEY: &str = "eafc3b";

pub const TOKENS: &str =
    r#"{"access":"access-1","access_expires":86400,"refresh":"refresh-1","refresh_expires":2592000}"#;
pub const REFRESHED: &str = r#"{"access":"access-2","access_expires":86400}"#;

struct Route {
    method: Method,
    path: String,
    once: VecDeque<HttpResponse>,
    always: Option<HttpResponse>,
}

impl Route {
    fn matches(&self, method: Method, path: &str) -> bool {
        if self.method != method {
            return false;
        }
        if self.path.contains('?') {
            self.path == path
        } else {
            self.path == strip_query(path)
        }
    }
}

/// In-memory [`HttpTransport`] with per-route scripted responses.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Transport whose token endpoints always succeed.
    pub fn with_tokens() -> Arc<Self> {
        let transport = Self::new();
        transport.respond_always(Method::Post, "/token/new/", 200, TOKENS);
        transport.respond_always(Method::Post, "/token/refresh", 200, REFRESHED);
        transport
    }

    /// Queue a response that is served once. Queued responses win over
    /// [`respond_always`](Self::respond_always).
    ///
    /// A `path` without `?` matches regardless of query string.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        let mut routes = self.routes.lock().unwrap();
        let response = HttpResponse::new(status, body.as_bytes());
        match routes.iter_mut().find(|route| route.method == method && route.path == path) {
            Some(route) => route.once.push_back(response),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                once: VecDeque::from([response]),
                always: None,
            }),
        }
    }

    /// Serve this response every time the route has nothing queued.
    pub fn respond_always(&self, method: Method, path: &str, status: u16, body: &str) {
        let mut routes = self.routes.lock().unwrap();
        let response = HttpResponse::new(status, body.as_bytes());
        match routes.iter_mut().find(|route| route.method == method && route.path == path) {
            Some(route) => route.always = Some(response),
            None => routes.push(Route {
                method,
                path: path.to_string(),
                once: VecDeque::new(),
                always: Some(response),
            }),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests to `path` (query string ignored).
    pub fn calls(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| {
                request.method == method && strip_query(relative(&request.url)) == path
            })
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Relative paths (with query) of every request, in order.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| relative(&request.url).to_string())
            .collect()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let path = relative(&request.url).to_string();
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let route = routes.iter_mut().find(|route| route.matches(method, &path));
        match route {
            Some(route) => route
                .once
                .pop_front()
                .or_else(|| route.always.clone())
                .ok_or_else(|| NordigenError::Transport(format!("script exhausted for {path}"))),
            None => Err(NordigenError::Transport(format!("no route for {method} {path}"))),
        }
    }
}

/// Client over `transport` with the given page size.
pub fn client(transport: &Arc<ScriptedTransport>, page_size: usize) -> Nordigen<Arc<ScriptedTransport>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("nordigen_core=debug")
        .with_test_writer()
        .try_init();

    Nordigen::builder()
        .secret_id(SECRET_ID)
        .secret_key(SECRET_KEY)
        .base_url(BASE_URL)
        .page_size(page_size)
        .build(Arc::clone(transport))
        .unwrap()
}

fn relative(url: &str) -> &str {
    url.strip_prefix(BASE_URL).unwrap_or(url)
}

fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}
