use super::account::{Account, AccountId};
use crate::error::{DuplicateAccountError, NotificationError};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts `account` unless its id is taken, in which case the store is left untouched.
    async fn create(&self, account: Account) -> Result<(), DuplicateAccountError>;
    /// Shared handle to the live account, so later mutations are visible through it.
    async fn get(&self, id: &AccountId) -> Option<Arc<Account>>;
    async fn all_accounts(&self) -> Vec<Arc<Account>>;
    /// Removes every account. Must not race with in-flight transfers.
    async fn clear(&self);
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify_about_transfer(
        &self,
        account: &Account,
        description: &str,
    ) -> Result<(), NotificationError>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type NotificationServiceBox = Box<dyn NotificationService>;
