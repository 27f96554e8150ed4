//! End-user agreement payloads

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use uuid::Uuid;

use crate::impl_wire_enum_conversions;

/// Data an agreement grants access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessScope {
    Balances,
    Details,
    Transactions,
}

impl_wire_enum_conversions!(AccessScope {
    Balances => "balances",
    Details => "details",
    Transactions => "transactions",
});

impl AccessScope {
    pub const ALL: [Self; 3] = [Self::Balances, Self::Details, Self::Transactions];
}

/// `POST /agreements/enduser/`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAgreementRequest {
    pub institution_id: String,
    #[serde_as(as = "DisplayFromStr")]
    pub max_historical_days: u32,
    pub access_valid_for_days: u32,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub access_scope: Vec<AccessScope>,
}

impl CreateAgreementRequest {
    /// Agreement for every scope with the given windows.
    pub fn new(
        institution_id: impl Into<String>,
        max_historical_days: u32,
        access_valid_for_days: u32,
    ) -> Self {
        Self {
            institution_id: institution_id.into(),
            max_historical_days,
            access_valid_for_days,
            access_scope: AccessScope::ALL.to_vec(),
        }
    }
}

/// `PUT /agreements/enduser/{id}/accept`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptAgreementRequest {
    pub user_agent: String,
    pub ip_address: IpAddr,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementResponse {
    pub id: Uuid,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub max_historical_days: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub access_valid_for_days: u32,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    #[serde(default)]
    pub access_scope: Vec<AccessScope>,
    #[serde(default)]
    pub accepted: Option<DateTime<Utc>>,
    pub institution_id: String,
}
