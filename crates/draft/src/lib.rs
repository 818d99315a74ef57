//! Purchase draft module.
//!
//! Pure domain logic only: the entry state machine and the draft collection.
//! Persistence of the draft is the application service's concern.

pub mod draft;
pub mod entry;

pub use draft::{Draft, UpsertOutcome};
pub use entry::ItemEntry;


