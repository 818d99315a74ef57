//! Line-item entry state machine.

use larder_catalog::{Catalog, CatalogEntry};
use larder_core::{DomainError, DomainResult, LineItem, LineItemId};

/// A single line item under construction.
///
/// Walks category -> product -> quantity. The price is derived from the
/// selected product's unit price whenever a quantity is present; it is never
/// entered directly. Selecting a new category resets the product, quantity
/// and price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemEntry {
    category: Option<String>,
    product: Option<CatalogEntry>,
    quantity: Option<f64>,
}

impl ItemEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from an existing item (edit flow). The carried unit price
    /// keeps price re-derivation working without a catalog lookup.
    pub fn from_item(item: &LineItem) -> Self {
        Self {
            category: None,
            product: Some(CatalogEntry::new(
                item.name.clone(),
                item.effective_unit_price(),
            )),
            quantity: Some(item.quantity),
        }
    }

    /// Select a category by exact name.
    pub fn select_category(&mut self, catalog: &Catalog, name: &str) -> DomainResult<()> {
        if catalog.products(name).is_none() {
            return Err(DomainError::invalid_input(format!(
                "unknown category {name:?}"
            )));
        }
        self.category = Some(name.to_string());
        self.product = None;
        self.quantity = None;
        Ok(())
    }

    /// Select a product from the current category by exact name.
    pub fn select_product(&mut self, catalog: &Catalog, name: &str) -> DomainResult<()> {
        let category = self
            .category
            .as_deref()
            .ok_or_else(|| DomainError::invalid_input("select a category first"))?;
        let entry = catalog.entry(category, name).ok_or_else(|| {
            DomainError::invalid_input(format!(
                "no product {name:?} in category {category:?}"
            ))
        })?;
        self.product = Some(entry.clone());
        Ok(())
    }

    /// Record the quantity input. Empty or non-numeric text clears the
    /// quantity, and with it the derived price (empty, not zero).
    pub fn set_quantity(&mut self, input: &str) {
        self.quantity = input.trim().parse::<f64>().ok().filter(|q| q.is_finite());
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn product(&self) -> Option<&CatalogEntry> {
        self.product.as_ref()
    }

    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    /// The derived price. Present only while both a product and a quantity
    /// are.
    pub fn price(&self) -> Option<f64> {
        match (&self.product, self.quantity) {
            (Some(product), Some(quantity)) => Some(quantity * product.unit_price),
            _ => None,
        }
    }

    /// Materialize a validated line item with a fresh id.
    pub fn build(&self) -> DomainResult<LineItem> {
        self.build_with_id(LineItemId::new())
    }

    /// Materialize under an existing id (edit flow).
    pub fn build_with_id(&self, id: LineItemId) -> DomainResult<LineItem> {
        let product = self
            .product
            .as_ref()
            .ok_or_else(|| DomainError::invalid_input("no product selected"))?;
        let quantity = self
            .quantity
            .ok_or_else(|| DomainError::invalid_input("no quantity entered"))?;
        LineItem::with_id(
            id,
            product.name.clone(),
            Some(product.unit_price),
            quantity,
            quantity * product.unit_price,
        )
    }
}
