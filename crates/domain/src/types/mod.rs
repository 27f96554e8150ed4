//! Wire types for the Nordigen API

pub mod account;
pub mod agreement;
pub mod hex_bytes;
pub mod institution;
pub mod page;
pub mod requisition;
pub mod token;

pub use account::{
    AccountDetails, AccountDetailsResponse, AccountReference, AccountResponse, Amount,
    BalanceResponse, BalancesResponse, TransactionResponse, Transactions, TransactionsResponse,
};
pub use agreement::{AcceptAgreementRequest, AccessScope, AgreementResponse, CreateAgreementRequest};
pub use hex_bytes::HexBytes;
pub use institution::InstitutionResponse;
pub use page::Page;
pub use requisition::{CreateRequisitionRequest, RequisitionResponse, RequisitionStatus};
pub use token::{RefreshRequest, RefreshResponse, TokenRequest, TokensResponse};
