//! A resource path bound to a [`RestClient`].

use nordigen_domain::{Page, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use super::{QueryParams, RestClient};
use crate::ports::{HttpTransport, Method};

/// Plain GET/POST/PUT/DELETE against `<path>[/<id>][?query]`.
///
/// No authentication handling happens here; see
/// [`NordigenResource`](crate::resource::NordigenResource) for that.
pub struct GenericResource<'a, T> {
    client: &'a RestClient<T>,
    path: String,
}

impl<'a, T: HttpTransport> GenericResource<'a, T> {
    /// Resource at `path` on `client`.
    pub fn new(client: &'a RestClient<T>, path: impl Into<String>) -> Self {
        Self { client, path: path.into() }
    }

    /// Collection path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `GET <path>/<id>?<query>`.
    pub fn get<R: DeserializeOwned>(&self, id: &str, query: &QueryParams) -> Result<R> {
        self.client.exec::<(), R>(Method::Get, &self.prepare_path(id, query), None)
    }

    /// `POST <path>/<id>` with a JSON body.
    pub fn post<B, R>(&self, id: &str, payload: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.client.exec(Method::Post, &self.prepare_path(id, &QueryParams::new()), Some(payload))
    }

    /// `PUT <path>/<id>` with a JSON body.
    pub fn put<B, R>(&self, id: &str, payload: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.client.exec(Method::Put, &self.prepare_path(id, &QueryParams::new()), Some(payload))
    }

    /// Whatever the server sends back on success is discarded.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.client
            .exec::<(), IgnoredAny>(Method::Delete, &self.prepare_path(id, &QueryParams::new()), None)
            .map(|_| ())
    }

    /// GET on an endpoint that answers with a bare JSON array.
    pub fn list<R: DeserializeOwned>(&self, query: &QueryParams) -> Result<Vec<R>> {
        self.get("", query)
    }

    /// GET on an endpoint that answers with a `{count, results}` page.
    pub fn page<R: DeserializeOwned>(&self, query: &QueryParams) -> Result<Page<R>> {
        self.get("", query)
    }

    fn prepare_path(&self, id: &str, query: &QueryParams) -> String {
        let mut path = self.path.clone();
        if !id.is_empty() {
            path.push('/');
            path.push_str(id);
        }
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.encode());
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ports::{HttpRequest, HttpResponse};

    #[derive(Default)]
    struct RecordingTransport {
        urls: Mutex<Vec<(Method, String)>>,
    }

    impl HttpTransport for RecordingTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.urls.lock().unwrap().push((request.method, request.url));
            Ok(HttpResponse::new(200, br#"{"summary":"Deleted","detail":"ok"}"#.to_vec()))
        }
    }

    #[test]
    fn test_paths_are_joined() {
        let client = RestClient::new(RecordingTransport::default(), "https://example.test/api/v2");
        let resource = GenericResource::new(&client, "/agreements/enduser");

        let _: serde_json::Value = resource.get("abc", &QueryParams::new()).unwrap();
        let _: serde_json::Value = resource.put("abc/accept", &serde_json::json!({})).unwrap();
        let _: serde_json::Value =
            resource.get("", &QueryParams::new().with("offset", "0").with("limit", "2")).unwrap();
        resource.delete("abc").unwrap();

        let urls = client.transport().urls.lock().unwrap();
        assert_eq!(
            *urls,
            vec![
                (Method::Get, "https://example.test/api/v2/agreements/enduser/abc".to_string()),
                (Method::Put, "https://example.test/api/v2/agreements/enduser/abc/accept".to_string()),
                (
                    Method::Get,
                    "https://example.test/api/v2/agreements/enduser?limit=2&offset=0".to_string()
                ),
                (Method::Delete, "https://example.test/api/v2/agreements/enduser/abc".to_string()),
            ]
        );
    }
}
