use crate::domain::account::AccountSnapshot;
use crate::error::Result;
use std::io::Write;

/// Writes the final ledger as `account,balance` CSV rows.
///
/// Balances are normalized on the way out, so `700.00` is written as `700`.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    /// Writes the header followed by one row per account, even for an empty ledger.
    pub fn write_accounts(
        &mut self,
        accounts: impl IntoIterator<Item = AccountSnapshot>,
    ) -> Result<()> {
        self.writer.write_record(["account", "balance"])?;
        for snapshot in accounts {
            self.writer.serialize(normalized(snapshot))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the final ledger as a pretty-printed JSON array.
pub fn write_accounts_json<W: Write>(
    sink: W,
    accounts: impl IntoIterator<Item = AccountSnapshot>,
) -> Result<()> {
    let accounts: Vec<AccountSnapshot> = accounts.into_iter().map(normalized).collect();
    serde_json::to_writer_pretty(sink, &accounts)?;
    Ok(())
}

fn normalized(snapshot: AccountSnapshot) -> AccountSnapshot {
    AccountSnapshot {
        balance: snapshot.balance.normalize(),
        ..snapshot
    }
}
