//! Account, balance and transaction payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account metadata (`GET /accounts/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub institution_id: String,
    #[serde(default)]
    pub status: String,
}

/// `GET /accounts/{id}/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetailsResponse {
    pub account: AccountDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountDetails {
    pub resource_id: Option<String>,
    pub iban: String,
    pub currency: String,
    pub owner_name: String,
    pub name: String,
    pub product: String,
    pub cash_account_type: String,
    pub status: String,
    pub usage: String,
}

/// Monetary amount; the value stays textual to keep the bank's precision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: String,
    pub currency: String,
}

/// `GET /accounts/{id}/balances`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalancesResponse {
    #[serde(default)]
    pub balances: Vec<BalanceResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub balance_amount: Amount,
    #[serde(default)]
    pub balance_type: String,
    #[serde(default)]
    pub last_change_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reference_date: Option<String>,
}

/// `GET /accounts/{id}/transactions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Transactions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transactions {
    pub booked: Vec<TransactionResponse>,
    pub pending: Vec<TransactionResponse>,
    pub information: Vec<TransactionResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionResponse {
    pub transaction_id: Option<String>,
    pub transaction_amount: Amount,
    pub booking_date: Option<String>,
    pub value_date: Option<String>,
    pub mandate_id: Option<String>,
    pub creditor_id: Option<String>,
    pub creditor_name: Option<String>,
    pub creditor_account: Option<AccountReference>,
    pub debtor_name: Option<String>,
    pub debtor_account: Option<AccountReference>,
    pub remittance_information_unstructured: Option<String>,
    pub remittance_information_unstructured_array: Vec<String>,
    pub additional_information: Option<String>,
    pub bank_transaction_code: Option<String>,
}

/// Counterparty account identifiers; banks fill whichever they support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountReference {
    pub iban: Option<String>,
    pub bban: Option<String>,
    pub pan: Option<String>,
    pub masked_pan: Option<String>,
    pub msisdn: Option<String>,
    pub other: Option<String>,
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transactions_decode_camel_case() {
        let body = r#"{
            "transactions": {
                "booked": [{
                    "transactionId": "2020103000624289-1",
                    "transactionAmount": {"amount": "45.00", "currency": "EUR"},
                    "bookingDate": "2020-10-30",
                    "debtorName": "MON MOTHMA",
                    "debtorAccount": {"iban": "GL0865354374424724"},
                    "remittanceInformationUnstructuredArray": ["For the support of Restoration"]
                }],
                "pending": [{
                    "transactionAmount": {"amount": "10.00", "currency": "EUR"},
                    "valueDate": "2020-10-29"
                }]
            }
        }"#;

        let response: TransactionsResponse = serde_json::from_str(body).unwrap();
        let booked = &response.transactions.booked[0];

        assert_eq!(booked.transaction_id.as_deref(), Some("2020103000624289-1"));
        assert_eq!(booked.transaction_amount.amount, "45.00");
        assert_eq!(
            booked.debtor_account.as_ref().and_then(|a| a.iban.as_deref()),
            Some("GL0865354374424724")
        );
        assert_eq!(booked.remittance_information_unstructured_array.len(), 1);
        assert_eq!(response.transactions.pending.len(), 1);
        assert!(response.transactions.information.is_empty());
    }

    #[test]
    fn test_balances_decode() {
        let body = r#"{"balances": [{
            "balanceAmount": {"amount": "1500.00", "currency": "EUR"},
            "balanceType": "expected",
            "lastChangeDateTime": "2021-06-01T09:24:05.123Z",
            "referenceDate": "2021-06-01"
        }]}"#;

        let response: BalancesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.balances[0].balance_type, "expected");
        assert!(response.balances[0].last_change_date_time.is_some());
    }

    #[test]
    fn test_account_details_decode() {
        let body = r#"{"account": {
            "resourceId": "534252452",
            "iban": "GL4871357393512958",
            "currency": "EUR",
            "ownerName": "Jane Doe",
            "cashAccountType": "CACC"
        }}"#;

        let response: AccountDetailsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.account.owner_name, "Jane Doe");
        assert_eq!(response.account.cash_account_type, "CACC");
        assert!(response.account.product.is_empty());
    }
}
