use crate::domain::account::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    DuplicateAccount(#[from] DuplicateAccountError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Returned by the account store when an identifier is already taken.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("Account id {0} already exists")]
pub struct DuplicateAccountError(pub AccountId);

/// Every way a transfer can be rejected. None of these leave a trace on the ledger.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TransferError {
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("Transfer amount must be positive, got {0}")]
    InvalidAmount(Decimal),
    #[error(
        "Insufficient balance in account {account}: requested {requested}, available {available}"
    )]
    InsufficientBalance {
        account: AccountId,
        requested: Decimal,
        available: Decimal,
    },
    #[error("Crediting {amount} to account {account} would overflow its balance")]
    BalanceOverflow { account: AccountId, amount: Decimal },
}

#[derive(Error, Debug)]
#[error("Notification failed: {0}")]
pub struct NotificationError(pub String);

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;
