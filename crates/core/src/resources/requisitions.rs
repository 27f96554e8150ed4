//! `/requisitions`

use nordigen_domain::{CreateRequisitionRequest, RequisitionResponse, Result};
use uuid::Uuid;

use crate::client::Nordigen;
use crate::collection::CollectionCursor;
use crate::ports::HttpTransport;
use crate::resource::NordigenResource;
use crate::rest::QueryParams;

const REQUISITIONS_PATH: &str = "/requisitions";

/// `/requisitions` endpoints.
pub struct RequisitionResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<'a, T: HttpTransport> RequisitionResource<'a, T> {
    /// Requisition endpoints of `client`.
    pub fn new(client: &'a Nordigen<T>) -> Self {
        Self { inner: NordigenResource::new(client, REQUISITIONS_PATH) }
    }

    /// One requisition by id.
    pub fn get(&self, id: Uuid) -> Result<RequisitionResponse> {
        self.inner.get(&id.to_string(), &QueryParams::new())
    }

    /// Cursor over all requisitions.
    ///
    /// # Errors
    /// Returns the failed first page.
    pub fn list(&self) -> Result<CollectionCursor<'a, RequisitionResponse, T>> {
        self.inner.collection(QueryParams::new())
    }

    /// Create a requisition.
    pub fn create(&self, request: &CreateRequisitionRequest) -> Result<RequisitionResponse> {
        self.inner.post("", request)
    }

    /// Delete a requisition.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.delete(&id.to_string())
    }
}
