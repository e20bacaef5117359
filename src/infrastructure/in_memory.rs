use crate::domain::account::{Account, AccountId};
use crate::domain::ports::AccountStore;
use crate::error::DuplicateAccountError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for accounts.
///
/// Uses `Arc<RwLock<HashMap<AccountId, Arc<Account>>>>`. The map lock only guards
/// membership; balances are guarded by each account's own mutex, so holding a
/// handle returned by `get` never blocks other lookups.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Arc<Account>>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<(), DuplicateAccountError> {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.id().clone()) {
            Entry::Occupied(entry) => Err(DuplicateAccountError(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(account));
                Ok(())
            }
        }
    }

    async fn get(&self, id: &AccountId) -> Option<Arc<Account>> {
        let accounts = self.accounts.read().await;
        accounts.get(id).cloned()
    }

    async fn all_accounts(&self) -> Vec<Arc<Account>> {
        let accounts = self.accounts.read().await;
        accounts.values().cloned().collect()
    }

    async fn clear(&self) {
        self.accounts.write().await.clear();
    }
}
