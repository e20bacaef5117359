//! Domain layer: account and transfer value types plus the ports the engine talks through.

pub mod account;
pub mod ports;
pub mod transfer;
