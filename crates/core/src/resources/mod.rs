//! Typed accessors for the API resources

pub mod accounts;
pub mod agreements;
pub mod institutions;
pub mod requisitions;

pub use accounts::{AccountDetailsResource, AccountResource, BalanceResource, TransactionResource};
pub use agreements::AgreementResource;
pub use institutions::InstitutionResource;
pub use requisitions::RequisitionResource;
