use crate::application::command::Command;
use crate::domain::account::{Account, AccountId};
use crate::domain::transfer::TransferRequest;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Open,
    Transfer,
}

/// One raw row of an operations file: `type, account, counterpart, amount`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub r#type: OperationType,
    pub account: String,
    pub counterpart: Option<String>,
    pub amount: Option<Decimal>,
}

impl TryFrom<Operation> for Command {
    type Error = LedgerError;

    fn try_from(op: Operation) -> Result<Self> {
        let account = AccountId::new(op.account)?;
        match op.r#type {
            OperationType::Open => {
                let opening = op.amount.unwrap_or(Decimal::ZERO);
                Ok(Command::Open(Account::with_balance(account, opening)?))
            }
            OperationType::Transfer => {
                let counterpart = op.counterpart.ok_or_else(|| {
                    LedgerError::ValidationError(format!(
                        "Transfer from {account} is missing a counterpart"
                    ))
                })?;
                let amount = op.amount.ok_or_else(|| {
                    LedgerError::ValidationError(format!(
                        "Transfer from {account} is missing an amount"
                    ))
                })?;
                Ok(Command::Transfer(TransferRequest::new(
                    account,
                    AccountId::new(counterpart)?,
                    amount,
                )))
            }
        }
    }
}

/// Reads ledger operations from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<Command>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads rows and turns them into commands.
    ///
    /// A bad row yields an error item; the rows after it are still read.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<Operation>()
            .map(|result| result.map_err(LedgerError::from).and_then(Command::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Balance;
    use rust_decimal_macros::dec;

    fn collect(data: &str) -> Vec<Result<Command>> {
        OperationReader::new(data.as_bytes()).commands().collect()
    }

    #[test]
    fn test_operation_deserialization() {
        let csv = "type, account, counterpart, amount\ntransfer, A, B, 12.5";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let result: Operation = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(result.r#type, OperationType::Transfer);
        assert_eq!(result.account, "A");
        assert_eq!(result.counterpart.as_deref(), Some("B"));
        assert_eq!(result.amount, Some(dec!(12.5)));
    }

    #[tokio::test]
    async fn test_reader_valid_stream() {
        let data = "type, account, counterpart, amount\nopen, A, , 1000\nopen, B,,\ntransfer, A, B, 300";
        let results = collect(data);
        assert_eq!(results.len(), 3);

        match results[0].as_ref().unwrap() {
            Command::Open(account) => {
                assert_eq!(account.id().as_str(), "A");
                assert_eq!(account.balance().await, Balance::new(dec!(1000)));
            }
            other => panic!("unexpected command {other:?}"),
        }
        match results[1].as_ref().unwrap() {
            Command::Open(account) => assert_eq!(account.balance().await, Balance::ZERO),
            other => panic!("unexpected command {other:?}"),
        }
        match results[2].as_ref().unwrap() {
            Command::Transfer(request) => {
                assert_eq!(request.from.as_str(), "A");
                assert_eq!(request.to.as_str(), "B");
                assert_eq!(request.amount, dec!(300));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_reader_malformed_lines() {
        let data = "type, account, counterpart, amount\n\
                    invalid, A, , 1\n\
                    transfer, A, , 1\n\
                    transfer, A, B, \n\
                    open, , , 1\n\
                    open, A, , -1\n\
                    open, A, , 1";
        let results = collect(data);

        assert_eq!(results.len(), 6);
        assert!(matches!(results[0], Err(LedgerError::CsvError(_))));
        for result in &results[1..5] {
            assert!(matches!(result, Err(LedgerError::ValidationError(_))));
        }
        assert!(results[5].is_ok());
    }

    #[test]
    fn test_reader_keeps_non_positive_transfer_amount() {
        // Rejecting it is the engine's job.
        let data = "type, account, counterpart, amount\ntransfer, A, B, 0";
        let results = collect(data);
        assert!(matches!(
            results[0],
            Ok(Command::Transfer(ref request)) if request.amount == dec!(0)
        ));
    }
}
