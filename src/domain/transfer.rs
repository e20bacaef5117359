use super::account::{AccountId, Amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to move `amount` from one account to another.
///
/// The amount is kept as a raw decimal; the ledger engine validates it after
/// both accounts have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "accountFrom")]
    pub from: AccountId,
    #[serde(rename = "accountTo")]
    pub to: AccountId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self { from, to, amount }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Debit,
    Credit,
}

/// The message delivered to one side of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferNotice<'a> {
    pub account: &'a AccountId,
    pub counterpart: &'a AccountId,
    pub amount: Amount,
    pub direction: TransferDirection,
}

impl fmt::Display for TransferNotice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            TransferDirection::Debit => write!(
                f,
                "Your account {} has been debited with amount {} and transferred to account {}",
                self.account, self.amount, self.counterpart
            ),
            TransferDirection::Credit => write!(
                f,
                "Your account {} has been credited with amount {} from account {}",
                self.account, self.amount, self.counterpart
            ),
        }
    }
}
