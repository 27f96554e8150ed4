//! Institution payloads

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// A bank (`GET /institutions`, `GET /institutions/{id}`)
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bic: String,
    /// Days of history the bank exposes; sent as a quoted integer.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub transaction_total_days: u32,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default, rename = "logo")]
    pub logo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_encoded_total_days() {
        let body = r#"{
            "id": "SANDBOXFINANCE_SFIN0000",
            "name": "Sandbox Finance",
            "bic": "SFIN0000",
            "transaction_total_days": "90",
            "countries": ["XX"],
            "logo": "https://cdn.nordigen.com/ais/SANDBOXFINANCE_SFIN0000.png"
        }"#;

        let institution: InstitutionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(institution.transaction_total_days, 90);
        assert_eq!(institution.countries, vec!["XX"]);

        let encoded = serde_json::to_value(&institution).unwrap();
        assert_eq!(encoded["transaction_total_days"], "90");
        assert_eq!(encoded["logo"], institution.logo_url);
    }

    #[test]
    fn test_plain_integer_total_days_accepted() {
        let body = r#"{"id": "X", "name": "Y", "transaction_total_days": 540}"#;
        let institution: InstitutionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(institution.transaction_total_days, 540);
    }
}
