//! Command line: argument parsing, the purchase book service, command handlers.
//!
//! The [`book::PurchaseBook`] service wires the draft, the ledger and the
//! persistent store together; `commands` maps parsed arguments onto it.

pub mod args;
pub mod book;
pub mod commands;

pub use book::{BookError, CommitReceipt, PurchaseBook};


