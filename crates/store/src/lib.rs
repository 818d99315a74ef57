//! Storage layer: state document schema, file locking, atomic writes.
//!
//! A single versioned JSON document holds both the uncommitted draft and the
//! committed ledger, so a commit is one atomic write. Decoding is strict:
//! records that fail numeric parsing are excluded and reported, never loaded
//! as NaN.

pub mod error;
pub mod file_store;
pub mod schema;
pub mod state_store;

pub use error::StoreError;
pub use file_store::{FileStore, default_state_path};
pub use schema::{
    PersistedState, RawNumber, RejectedRecord, SCHEMA_VERSION, STATE_KIND, StoredLineItem,
};
pub use state_store::{MemoryStore, StateSnapshot, StateStore};


