//! Committed purchase ledger (append-only).
//!
//! Pure domain logic only. Durability of the ledger lives in `larder-store`.

pub mod ledger;

pub use ledger::Ledger;


