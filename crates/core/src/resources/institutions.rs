//! `/institutions`

use nordigen_domain::{InstitutionResponse, Result};

use crate::client::Nordigen;
use crate::ports::HttpTransport;
use crate::resource::NordigenResource;
use crate::rest::QueryParams;

const INSTITUTIONS_PATH: &str = "/institutions";

/// `/institutions` endpoints.
pub struct InstitutionResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<'a, T: HttpTransport> InstitutionResource<'a, T> {
    /// Institution endpoints of `client`.
    pub fn new(client: &'a Nordigen<T>) -> Self {
        Self { inner: NordigenResource::new(client, INSTITUTIONS_PATH) }
    }

    /// Institutions in `country` (ISO 3166 code); an empty country lists all.
    pub fn list(&self, country: &str) -> Result<Vec<InstitutionResponse>> {
        self.inner.list(&country_filter(country))
    }

    /// Institutions in `country` with payments enabled.
    pub fn list_with_enabled_payments(&self, country: &str) -> Result<Vec<InstitutionResponse>> {
        self.inner.list(&country_filter(country).with("payments_enabled", "true"))
    }

    /// Institutions in `country` with payments disabled.
    pub fn list_with_disabled_payments(&self, country: &str) -> Result<Vec<InstitutionResponse>> {
        self.inner.list(&country_filter(country).with("payments_enabled", "false"))
    }

    /// One institution by id.
    pub fn get(&self, id: &str) -> Result<InstitutionResponse> {
        self.inner.get(id, &QueryParams::new())
    }
}

fn country_filter(country: &str) -> QueryParams {
    let mut query = QueryParams::new();
    if !country.is_empty() {
        query.add("country", country);
    }
    query
}
