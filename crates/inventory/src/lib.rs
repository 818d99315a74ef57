//! Inventory summary module.
//!
//! This crate contains the read-side fold from committed line items to
//! per-product summaries, implemented purely as deterministic domain logic
//! (no IO, no storage).

pub mod summary;

pub use summary::{InventorySummary, summarize};


