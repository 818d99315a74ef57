//! Purchased line items.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::LineItemId;

/// One recorded product line.
///
/// `price` is derived from the catalog unit price when the line is entered
/// and stored independently afterwards; later catalog edits never rewrite
/// recorded lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub name: String,
    /// Catalog unit price carried through at entry time. Absent on records
    /// written before the field existed.
    pub unit_price: Option<f64>,
    pub quantity: f64,
    pub price: f64,
}

impl LineItem {
    /// Build a validated line item with a fresh id.
    pub fn new(
        name: impl Into<String>,
        unit_price: Option<f64>,
        quantity: f64,
        price: f64,
    ) -> DomainResult<Self> {
        Self::with_id(LineItemId::new(), name, unit_price, quantity, price)
    }

    /// Build a validated line item under an existing id (edit flows).
    pub fn with_id(
        id: LineItemId,
        name: impl Into<String>,
        unit_price: Option<f64>,
        quantity: f64,
        price: f64,
    ) -> DomainResult<Self> {
        let item = Self {
            id,
            name: name.into(),
            unit_price,
            quantity,
            price,
        };
        item.validate()?;
        Ok(item)
    }

    /// Check the field invariants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_input("name cannot be empty"));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(DomainError::invalid_input("quantity must be a positive number"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::invalid_input("price must be a non-negative number"));
        }
        if let Some(unit_price) = self.unit_price {
            if !unit_price.is_finite() || unit_price < 0.0 {
                return Err(DomainError::invalid_input(
                    "unit price must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// Unit price used when re-deriving `price` after a quantity edit.
    ///
    /// Falls back to the stored price/quantity ratio for records that predate
    /// the carried catalog field (quantity is positive on validated items).
    pub fn effective_unit_price(&self) -> f64 {
        match self.unit_price {
            Some(unit_price) => unit_price,
            None => self.price / self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_invalid(result: DomainResult<LineItem>, needle: &str) {
        match result {
            Err(DomainError::InvalidInput(msg)) if msg.contains(needle) => {}
            other => panic!("Expected InvalidInput about {needle:?}, got {other:?}"),
        }
    }

    #[test]
    fn builds_a_validated_item() {
        let item = LineItem::new("Milk", Some(20.0), 3.0, 60.0).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.price, 60.0);
    }

    #[test]
    fn rejects_blank_name() {
        expect_invalid(LineItem::new("   ", Some(20.0), 3.0, 60.0), "name");
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        expect_invalid(LineItem::new("Milk", Some(20.0), 0.0, 0.0), "quantity");
        expect_invalid(LineItem::new("Milk", Some(20.0), -1.0, -20.0), "quantity");
    }

    #[test]
    fn rejects_non_finite_numbers() {
        expect_invalid(LineItem::new("Milk", Some(20.0), f64::NAN, 60.0), "quantity");
        expect_invalid(LineItem::new("Milk", Some(20.0), 3.0, f64::INFINITY), "price");
        expect_invalid(LineItem::new("Milk", Some(f64::NAN), 3.0, 60.0), "unit price");
    }

    #[test]
    fn rejects_negative_price() {
        expect_invalid(LineItem::new("Milk", Some(20.0), 3.0, -60.0), "price");
    }

    #[test]
    fn effective_unit_price_prefers_the_carried_value() {
        let item = LineItem::new("Milk", Some(20.0), 3.0, 60.0).unwrap();
        assert_eq!(item.effective_unit_price(), 20.0);
    }

    #[test]
    fn effective_unit_price_falls_back_to_the_stored_ratio() {
        let item = LineItem::new("Milk", None, 4.0, 100.0).unwrap();
        assert_eq!(item.effective_unit_price(), 25.0);
    }

    #[test]
    fn with_id_keeps_the_given_id() {
        let id = LineItemId::new();
        let item = LineItem::with_id(id, "Curd", Some(25.0), 2.0, 50.0).unwrap();
        assert_eq!(item.id, id);
    }
}


