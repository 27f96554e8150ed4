//! `/agreements/enduser`

use nordigen_domain::{AcceptAgreementRequest, AgreementResponse, CreateAgreementRequest, Result};
use uuid::Uuid;

use crate::client::Nordigen;
use crate::collection::CollectionCursor;
use crate::ports::HttpTransport;
use crate::resource::NordigenResource;
use crate::rest::QueryParams;

const AGREEMENTS_PATH: &str = "/agreements/enduser";

/// `/agreements/enduser` endpoints.
pub struct AgreementResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<'a, T: HttpTransport> AgreementResource<'a, T> {
    /// Agreement endpoints of `client`.
    pub fn new(client: &'a Nordigen<T>) -> Self {
        Self { inner: NordigenResource::new(client, AGREEMENTS_PATH) }
    }

    /// One agreement by id.
    pub fn get(&self, id: Uuid) -> Result<AgreementResponse> {
        self.inner.get(&id.to_string(), &QueryParams::new())
    }

    /// Cursor over all agreements.
    ///
    /// # Errors
    /// Returns the failed first page.
    pub fn list(&self) -> Result<CollectionCursor<'a, AgreementResponse, T>> {
        self.inner.collection(QueryParams::new())
    }

    /// Create an agreement.
    pub fn create(&self, request: &CreateAgreementRequest) -> Result<AgreementResponse> {
        self.inner.post("", request)
    }

    /// Record end-user acceptance of agreement `id`.
    ///
    /// # Errors
    /// Returns the failed call.
    pub fn accept(&self, id: Uuid, request: &AcceptAgreementRequest) -> Result<AgreementResponse> {
        self.inner.put(&format!("{id}/accept"), request)
    }

    /// Delete an agreement.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.delete(&id.to_string())
    }
}
