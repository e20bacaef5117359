use super::command::Command;
use crate::domain::account::{Account, AccountId, AccountSnapshot, Amount, Balance};
use crate::domain::ports::{AccountStoreBox, NotificationServiceBox};
use crate::domain::transfer::{TransferDirection, TransferNotice, TransferRequest};
use crate::error::{DuplicateAccountError, Result, TransferError};
use std::sync::Arc;
use tokio::sync::MutexGuard;

/// Executes fund transfers between accounts held in an [`AccountStore`].
///
/// `LedgerEngine` is `Send + Sync`; share it behind an `Arc` to run transfers from
/// many tasks at once. Transfers over disjoint account pairs never contend.
/// Transfers sharing an account are serialized on that account's lock, and every
/// lock is taken in ascending `AccountId` order so opposing transfers over the
/// same pair cannot deadlock.
///
/// [`AccountStore`]: crate::domain::ports::AccountStore
pub struct LedgerEngine {
    account_store: AccountStoreBox,
    notification_service: NotificationServiceBox,
}

impl LedgerEngine {
    /// Creates a new `LedgerEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `account_store` - The store holding the live accounts.
    /// * `notification_service` - Informed of each side of a committed transfer.
    pub fn new(
        account_store: AccountStoreBox,
        notification_service: NotificationServiceBox,
    ) -> Self {
        Self {
            account_store,
            notification_service,
        }
    }

    pub async fn create_account(&self, account: Account) -> Result<(), DuplicateAccountError> {
        self.account_store.create(account).await
    }

    pub async fn get_account(&self, id: &AccountId) -> Option<Arc<Account>> {
        self.account_store.get(id).await
    }

    /// Drops every account. Only call this between independent scenarios.
    pub async fn clear_accounts(&self) {
        self.account_store.clear().await;
    }

    /// Moves `request.amount` from `request.from` to `request.to`.
    ///
    /// Either both balances change or neither does. All failures are reported
    /// before anything is mutated and no notification is sent for them.
    ///
    /// A self-transfer is accepted as a no-op once the account is confirmed to
    /// hold at least `amount`; nothing is mutated and nobody is notified.
    pub async fn transfer(&self, request: TransferRequest) -> Result<(), TransferError> {
        let from = self.resolve(&request.from).await?;
        let to = self.resolve(&request.to).await?;
        let amount = Amount::new(request.amount)?;

        if request.is_self_transfer() {
            let balance = from.lock_balance().await;
            return ensure_covers(&from, &balance, amount);
        }

        {
            let (mut from_balance, mut to_balance) = lock_pair(&from, &to).await;
            ensure_covers(&from, &from_balance, amount)?;
            let debited = from_balance.checked_debit(amount).ok_or_else(|| {
                TransferError::InsufficientBalance {
                    account: from.id().clone(),
                    requested: amount.value(),
                    available: from_balance.value(),
                }
            })?;
            let credited = to_balance.checked_credit(amount).ok_or_else(|| {
                TransferError::BalanceOverflow {
                    account: to.id().clone(),
                    amount: amount.value(),
                }
            })?;
            // Both values are computed before either is written, and nothing awaits
            // in between, so the pair is never left half applied.
            *from_balance = debited;
            *to_balance = credited;
        }

        tracing::debug!(
            from = %request.from,
            to = %request.to,
            %amount,
            "transfer committed"
        );

        self.notify(
            &from,
            TransferNotice {
                account: from.id(),
                counterpart: to.id(),
                amount,
                direction: TransferDirection::Debit,
            },
        )
        .await;
        self.notify(
            &to,
            TransferNotice {
                account: to.id(),
                counterpart: from.id(),
                amount,
                direction: TransferDirection::Credit,
            },
        )
        .await;

        Ok(())
    }

    /// Reads several balances as one consistent view.
    ///
    /// Locks are taken in the same order `transfer` uses, so the result can never
    /// contain one side of a transfer without the other. Snapshots come back
    /// sorted by account id, duplicates removed.
    pub async fn balances(
        &self,
        ids: &[AccountId],
    ) -> Result<Vec<AccountSnapshot>, TransferError> {
        let mut ordered: Vec<&AccountId> = ids.iter().collect();
        ordered.sort();
        ordered.dedup();

        let mut accounts = Vec::with_capacity(ordered.len());
        for id in ordered {
            accounts.push(self.resolve(id).await?);
        }

        let mut guards = Vec::with_capacity(accounts.len());
        for account in &accounts {
            guards.push(account.lock_balance().await);
        }

        Ok(accounts
            .iter()
            .zip(&guards)
            .map(|(account, balance)| AccountSnapshot {
                account: account.id().clone(),
                balance: **balance,
            })
            .collect())
    }

    /// Applies one decoded command.
    pub async fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::Open(account) => self.create_account(account).await?,
            Command::Transfer(request) => self.transfer(request).await?,
        }
        Ok(())
    }

    /// Consumes the engine and returns the final state of all accounts, sorted by id.
    pub async fn into_results(self) -> Vec<AccountSnapshot> {
        let mut snapshots = Vec::new();
        for account in self.account_store.all_accounts().await {
            snapshots.push(account.snapshot().await);
        }
        snapshots.sort_by(|a, b| a.account.cmp(&b.account));
        snapshots
    }

    async fn resolve(&self, id: &AccountId) -> Result<Arc<Account>, TransferError> {
        self.account_store
            .get(id)
            .await
            .ok_or_else(|| TransferError::AccountNotFound(id.clone()))
    }

    async fn notify(&self, account: &Account, notice: TransferNotice<'_>) {
        let description = notice.to_string();
        if let Err(e) = self
            .notification_service
            .notify_about_transfer(account, &description)
            .await
        {
            tracing::warn!(account = %account.id(), error = %e, "transfer notification dropped");
        }
    }
}

/// Locks both balances, lower account id first. Returns `(from, to)` guards.
async fn lock_pair<'a>(
    from: &'a Account,
    to: &'a Account,
) -> (MutexGuard<'a, Balance>, MutexGuard<'a, Balance>) {
    if from.id() < to.id() {
        let from_balance = from.lock_balance().await;
        let to_balance = to.lock_balance().await;
        (from_balance, to_balance)
    } else {
        let to_balance = to.lock_balance().await;
        let from_balance = from.lock_balance().await;
        (from_balance, to_balance)
    }
}

fn ensure_covers(
    account: &Account,
    balance: &Balance,
    amount: Amount,
) -> Result<(), TransferError> {
    if balance.covers(amount) {
        Ok(())
    } else {
        Err(TransferError::InsufficientBalance {
            account: account.id().clone(),
            requested: amount.value(),
            available: balance.value(),
        })
    }
}
