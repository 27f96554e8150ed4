//! Authenticated resource wrapper

use nordigen_domain::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::Nordigen;
use crate::collection::CollectionCursor;
use crate::ports::HttpTransport;
use crate::rest::{GenericResource, QueryParams};

/// A [`GenericResource`] whose every call goes through
/// [`Nordigen::with_reauth`].
pub struct NordigenResource<'a, T> {
    client: &'a Nordigen<T>,
    generic: GenericResource<'a, T>,
}

impl<'a, T: HttpTransport> NordigenResource<'a, T> {
    /// Resource at `path` on `client`.
    pub fn new(client: &'a Nordigen<T>, path: impl Into<String>) -> Self {
        Self { client, generic: GenericResource::new(client.rest(), path) }
    }

    /// Collection path relative to the base URL.
    pub fn path(&self) -> &str {
        self.generic.path()
    }

    /// Client the resource borrows.
    pub fn client(&self) -> &'a Nordigen<T> {
        self.client
    }

    /// Run `op` against the underlying resource under the re-authentication
    /// policy.
    pub fn wrap<R>(&self, mut op: impl FnMut(&GenericResource<'a, T>) -> Result<R>) -> Result<R> {
        self.client.with_reauth(|| op(&self.generic))
    }

    /// `GET <path>/<id>?<query>`.
    ///
    /// # Errors
    /// Returns the failed call after the re-authentication retry.
    pub fn get<R: DeserializeOwned>(&self, id: &str, query: &QueryParams) -> Result<R> {
        self.wrap(|generic| generic.get(id, query))
    }

    /// `GET <path>?<query>` decoded as a plain array.
    ///
    /// # Errors
    /// Returns the failed call after the re-authentication retry.
    pub fn list<R: DeserializeOwned>(&self, query: &QueryParams) -> Result<Vec<R>> {
        self.wrap(|generic| generic.list(query))
    }

    /// `POST <path>/<id>` with a JSON body.
    pub fn post<B, R>(&self, id: &str, payload: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.wrap(|generic| generic.post(id, payload))
    }

    /// `PUT <path>/<id>` with a JSON body.
    pub fn put<B, R>(&self, id: &str, payload: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.wrap(|generic| generic.put(id, payload))
    }

    /// `DELETE <path>/<id>`, ignoring the response body.
    ///
    /// # Errors
    /// Returns the failed call after the re-authentication retry.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.wrap(|generic| generic.delete(id))
    }

    /// Paged listing of this resource.
    pub fn collection<R: DeserializeOwned>(
        &self,
        filters: QueryParams,
    ) -> Result<CollectionCursor<'a, R, T>> {
        self.client.collection(self.generic.path(), filters)
    }
}
