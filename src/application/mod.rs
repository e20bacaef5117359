//! Application layer containing the ledger orchestration.
//!
//! This module defines the `LedgerEngine`, the single entry point for moving
//! funds, and the `Command` values fed to it by the input interfaces.

pub mod command;
pub mod engine;
