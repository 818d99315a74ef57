use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised while loading or validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog is invalid: {0}")]
    Invalid(String),
}

impl CatalogError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// One sellable product inside a category.
///
/// The wire name of the price field is `pricePerKg` (the external catalog
/// format); internally it is just the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "pricePerKg")]
    pub unit_price: f64,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            unit_price,
        }
    }
}

/// A named group of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    name: String,
    products: Vec<CatalogEntry>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn products(&self) -> &[CatalogEntry] {
        &self.products
    }
}

/// Read-only reference data: categories and the products they contain.
///
/// Loaded once at startup and never mutated afterwards. Categories are kept
/// in sorted order so listings are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// The built-in reference data used when no catalog file is supplied.
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category {
                    name: "Dairy".to_string(),
                    products: vec![
                        CatalogEntry::new("Milk", 20.0),
                        CatalogEntry::new("Curd", 25.0),
                    ],
                },
                Category {
                    name: "Fruits".to_string(),
                    products: vec![
                        CatalogEntry::new("Apple", 100.0),
                        CatalogEntry::new("Banana", 30.0),
                    ],
                },
            ],
        }
    }

    /// Parse the external mapping `{ "<category>": [ { name, pricePerKg } ] }`.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let map: BTreeMap<String, Vec<CatalogEntry>> = serde_json::from_str(text)?;
        Self::from_map(map)
    }

    fn from_map(map: BTreeMap<String, Vec<CatalogEntry>>) -> Result<Self, CatalogError> {
        let mut categories = Vec::with_capacity(map.len());
        for (name, products) in map {
            if name.trim().is_empty() {
                return Err(CatalogError::invalid("category name cannot be empty"));
            }
            for entry in &products {
                if entry.name.trim().is_empty() {
                    return Err(CatalogError::invalid(format!(
                        "category {name:?} has a product with an empty name"
                    )));
                }
                if !entry.unit_price.is_finite() || entry.unit_price < 0.0 {
                    return Err(CatalogError::invalid(format!(
                        "product {:?} has an invalid unit price",
                        entry.name
                    )));
                }
                let duplicates = products.iter().filter(|p| p.name == entry.name).count();
                if duplicates > 1 {
                    return Err(CatalogError::invalid(format!(
                        "category {name:?} lists product {:?} more than once",
                        entry.name
                    )));
                }
            }
            categories.push(Category { name, products });
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Exact, case-sensitive category lookup.
    pub fn products(&self, category: &str) -> Option<&[CatalogEntry]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.products.as_slice())
    }

    /// Exact lookup of one product within one category.
    pub fn entry(&self, category: &str, product: &str) -> Option<&CatalogEntry> {
        self.products(category)?.iter().find(|p| p.name == product)
    }

    /// Case-insensitive substring match over category names. An empty query
    /// matches everything.
    pub fn search_categories(&self, query: &str) -> Vec<&Category> {
        let needle = query.to_lowercase();
        self.categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring match over product names within a category.
    /// `None` when the category itself does not exist.
    pub fn search_products(&self, category: &str, query: &str) -> Option<Vec<&CatalogEntry>> {
        let needle = query.to_lowercase();
        Some(
            self.products(category)?
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_resolves_known_entries() {
        let catalog = Catalog::builtin();
        let milk = catalog.entry("Dairy", "Milk").unwrap();
        assert_eq!(milk.unit_price, 20.0);
        let banana = catalog.entry("Fruits", "Banana").unwrap();
        assert_eq!(banana.unit_price, 30.0);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.entry("dairy", "Milk").is_none());
        assert!(catalog.entry("Dairy", "milk").is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let hits = catalog.search_categories("dAiRy");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Dairy");

        let hits = catalog.search_products("Fruits", "an").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Banana");
    }

    #[test]
    fn empty_query_matches_everything() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search_categories("").len(), 2);
        assert_eq!(catalog.search_products("Dairy", "").unwrap().len(), 2);
    }

    #[test]
    fn search_in_unknown_category_is_none() {
        assert!(Catalog::builtin().search_products("Meat", "").is_none());
    }

    #[test]
    fn parses_the_external_mapping() {
        let catalog = Catalog::from_json_str(
            r#"{
                "Fruits": [ { "name": "Apple", "pricePerKg": 100 } ],
                "Dairy": [ { "name": "Milk", "pricePerKg": 20.5 } ]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.entry("Dairy", "Milk").unwrap().unit_price, 20.5);
        // Sorted order, independent of the order in the document.
        let names: Vec<&str> = catalog.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Dairy", "Fruits"]);
    }

    #[test]
    fn rejects_negative_unit_price() {
        let err = Catalog::from_json_str(
            r#"{ "Dairy": [ { "name": "Milk", "pricePerKg": -1 } ] }"#,
        )
        .unwrap_err();
        match err {
            CatalogError::Invalid(msg) if msg.contains("unit price") => {}
            other => panic!("Expected Invalid about unit price, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_product_names() {
        let err = Catalog::from_json_str(
            r#"{ "Dairy": [
                { "name": "Milk", "pricePerKg": 20 },
                { "name": "Milk", "pricePerKg": 22 }
            ] }"#,
        )
        .unwrap_err();
        match err {
            CatalogError::Invalid(msg) if msg.contains("more than once") => {}
            other => panic!("Expected Invalid about duplicates, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_names() {
        assert!(Catalog::from_json_str(r#"{ " ": [] }"#).is_err());
        assert!(
            Catalog::from_json_str(r#"{ "Dairy": [ { "name": "", "pricePerKg": 1 } ] }"#).is_err()
        );
    }

    #[test]
    fn rejects_malformed_json() {
        match Catalog::from_json_str("not json") {
            Err(CatalogError::Parse(_)) => {}
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}

