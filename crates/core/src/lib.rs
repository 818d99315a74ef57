//! `larder-core` — shared domain primitives.
//!
//! The line item, its identifier, and the error type every other crate
//! builds on. **Pure domain** only: no infrastructure concerns.

pub mod error;
pub mod id;
pub mod item;

pub use error::{DomainError, DomainResult};
pub use id::LineItemId;
pub use item::LineItem;


