#![allow(dead_code)]

use fund_ledger::application::engine::LedgerEngine;
use fund_ledger::domain::account::{Account, AccountId};
use fund_ledger::infrastructure::in_memory::InMemoryAccountStore;
use fund_ledger::infrastructure::notification::LoggingNotificationService;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn id(s: &str) -> AccountId {
    AccountId::new(s).unwrap()
}

pub async fn engine_with(accounts: &[(&str, Decimal)]) -> LedgerEngine {
    let engine = LedgerEngine::new(
        Box::new(InMemoryAccountStore::new()),
        Box::new(LoggingNotificationService::new()),
    );
    for (name, balance) in accounts {
        engine
            .create_account(Account::with_balance(id(name), *balance).unwrap())
            .await
            .unwrap();
    }
    engine
}

/// Writes `accounts` accounts opened with 100 each, then `transfers` transfers of 1
/// cycling through neighbouring pairs.
pub fn generate_csv(path: &Path, accounts: usize, transfers: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["type", "account", "counterpart", "amount"])?;

    for i in 0..accounts {
        wtr.write_record(["open", &format!("Id-{i}"), "", "100"])?;
    }
    for i in 0..transfers {
        let from = i % accounts;
        let to = (i + 1) % accounts;
        wtr.write_record([
            "transfer",
            &format!("Id-{from}"),
            &format!("Id-{to}"),
            "1",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
