//! Product catalog module (read-only reference data).
//!
//! No IO here: callers read the catalog document themselves and hand the
//! text to [`Catalog::from_json_str`].

pub mod catalog;

pub use catalog::{Catalog, CatalogEntry, CatalogError, Category};


