use crate::domain::account::Account;
use crate::domain::transfer::TransferRequest;

/// A single instruction for the ledger, as decoded from an input stream.
#[derive(Debug)]
pub enum Command {
    Open(Account),
    Transfer(TransferRequest),
}
