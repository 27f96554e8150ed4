//! `/accounts` and its per-account sub-resources

use chrono::NaiveDate;
use nordigen_domain::constants::DATE_FORMAT;
use nordigen_domain::{
    AccountDetailsResponse, AccountResponse, BalancesResponse, Result, TransactionsResponse,
};
use uuid::Uuid;

use crate::client::Nordigen;
use crate::ports::HttpTransport;
use crate::resource::NordigenResource;
use crate::rest::QueryParams;

const ACCOUNTS_PATH: &str = "/accounts";

/// `/accounts` endpoints.
pub struct AccountResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<'a, T: HttpTransport> AccountResource<'a, T> {
    /// Account endpoints of `client`.
    pub fn new(client: &'a Nordigen<T>) -> Self {
        Self { inner: NordigenResource::new(client, ACCOUNTS_PATH) }
    }

    /// Account metadata.
    pub fn get(&self, id: Uuid) -> Result<AccountResponse> {
        self.inner.get(&id.to_string(), &QueryParams::new())
    }

    /// `/accounts/<id>/details`.
    pub fn details(&self, id: Uuid) -> AccountDetailsResource<'a, T> {
        AccountDetailsResource { inner: self.sub_resource(id, "details") }
    }

    /// `/accounts/<id>/balances`.
    pub fn balances(&self, id: Uuid) -> BalanceResource<'a, T> {
        BalanceResource { inner: self.sub_resource(id, "balances") }
    }

    /// `/accounts/<id>/transactions`.
    pub fn transactions(&self, id: Uuid) -> TransactionResource<'a, T> {
        TransactionResource { inner: self.sub_resource(id, "transactions") }
    }

    fn sub_resource(&self, id: Uuid, name: &str) -> NordigenResource<'a, T> {
        NordigenResource::new(self.inner.client(), format!("{ACCOUNTS_PATH}/{id}/{name}"))
    }
}

/// `/accounts/{id}/details`
pub struct AccountDetailsResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<T: HttpTransport> AccountDetailsResource<'_, T> {
    /// Account details.
    pub fn get(&self) -> Result<AccountDetailsResponse> {
        self.inner.get("", &QueryParams::new())
    }
}

/// `/accounts/{id}/balances`
pub struct BalanceResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<T: HttpTransport> BalanceResource<'_, T> {
    /// Account balances.
    pub fn get(&self) -> Result<BalancesResponse> {
        self.inner.get("", &QueryParams::new())
    }
}

/// `/accounts/{id}/transactions`
pub struct TransactionResource<'a, T> {
    inner: NordigenResource<'a, T>,
}

impl<T: HttpTransport> TransactionResource<'_, T> {
    /// Transactions, optionally limited to a booking date range (inclusive).
    pub fn get(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<TransactionsResponse> {
        let mut query = QueryParams::new();
        if let Some(date) = date_from {
            query.add("date_from", date.format(DATE_FORMAT).to_string());
        }
        if let Some(date) = date_to {
            query.add("date_to", date.format(DATE_FORMAT).to_string());
        }
        self.inner.get("", &query)
    }
}
