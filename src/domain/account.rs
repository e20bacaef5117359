use crate::error::{LedgerError, Result, TransferError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::{Mutex, MutexGuard};

/// Unique, immutable identifier of an account.
///
/// Identifiers are totally ordered; the ledger engine relies on this order to
/// decide in which sequence account locks are taken.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(LedgerError::ValidationError(
                "Account id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for AccountId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The funds held by an account.
///
/// Wraps `rust_decimal::Decimal` so that balances are never rounded; the value
/// moved out of one balance is exactly the value moved into the other.
///
/// A `Balance` on its own may hold any value. Non-negativity is enforced where a
/// balance enters the ledger (`Account::with_balance`) and on every debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Balance(Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether this balance can fund a debit of `amount` without going negative.
    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.value()
    }

    /// Strips trailing zeros, e.g. `700.00` becomes `700`.
    pub fn normalize(&self) -> Self {
        Self(self.0.normalize())
    }

    /// The balance after crediting `amount`, or `None` if it would overflow `Decimal`.
    pub fn checked_credit(&self, amount: Amount) -> Option<Self> {
        self.0.checked_add(amount.0).map(Self)
    }

    /// The balance after debiting `amount`, or `None` if it would go negative.
    pub fn checked_debit(&self, amount: Amount) -> Option<Self> {
        if !self.covers(amount) {
            return None;
        }
        self.0.checked_sub(amount.0).map(Self)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive amount of money to move between accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, TransferError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(TransferError::InvalidAmount(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = TransferError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live account held by the account store.
///
/// The balance sits behind its own mutex. Only the ledger engine takes that lock
/// for writing, and it always does so in ascending `AccountId` order.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: Mutex<Balance>,
}

impl Account {
    /// Opens an account with a zero balance.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: Mutex::new(Balance::ZERO),
        }
    }

    /// Opens an account with the given opening balance, which must not be negative.
    pub fn with_balance(id: AccountId, balance: Decimal) -> Result<Self> {
        if balance < Decimal::ZERO {
            return Err(LedgerError::ValidationError(format!(
                "Opening balance of account {id} must not be negative, got {balance}"
            )));
        }
        Ok(Self {
            id,
            balance: Mutex::new(Balance::new(balance)),
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Current balance. Waits for any in-flight transfer touching this account.
    pub async fn balance(&self) -> Balance {
        *self.balance.lock().await
    }

    pub async fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            account: self.id.clone(),
            balance: self.balance().await,
        }
    }

    pub(crate) async fn lock_balance(&self) -> MutexGuard<'_, Balance> {
        self.balance.lock().await
    }
}

/// Point-in-time copy of an account, detached from the live ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account: AccountId,
    pub balance: Balance,
}
