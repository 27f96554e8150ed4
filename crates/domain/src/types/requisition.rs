//! Requisition payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_wire_enum_conversions;

/// Lifecycle of a requisition as reported in its `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequisitionStatus {
    Created,
    GivingConsent,
    UndergoingAuthentication,
    Rejected,
    SelectingAccounts,
    GrantingAccess,
    Linked,
    Suspended,
    Expired,
}

impl_wire_enum_conversions!(RequisitionStatus {
    Created => "CR",
    GivingConsent => "GC",
    UndergoingAuthentication => "UA",
    Rejected => "RJ",
    SelectingAccounts => "SA",
    GrantingAccess => "GA",
    Linked => "LN",
    Suspended => "SU",
    Expired => "EX",
});

/// `POST /requisitions/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateRequisitionRequest {
    pub redirect: String,
    pub institution_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<Uuid>,
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_language: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssn: String,
    pub account_selection: bool,
    pub redirect_immediate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequisitionResponse {
    pub id: Uuid,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, rename = "redirect")]
    pub redirect_url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub institution_id: String,
    #[serde(default)]
    pub agreement: Option<Uuid>,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub accounts: Vec<Uuid>,
    #[serde(default)]
    pub user_language: String,
    /// Bank authorization link to send the end user to.
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub account_selection: bool,
    #[serde(default)]
    pub redirect_immediate: bool,
}

impl RequisitionResponse {
    /// Parsed `status`, `None` for codes this client does not know.
    pub fn parsed_status(&self) -> Option<RequisitionStatus> {
        self.status.parse().ok()
    }
}
