//! Inventory summary projection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use larder_core::LineItem;

/// Read model: one row per distinct product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub name: String,
    pub total_quantity: f64,
    pub total_value: f64,
    /// `total_value / total_quantity`; reported as `0.0` when the quantity
    /// sums to zero (see `zero_quantity`) so NaN never leaves this module.
    pub average_unit_price: f64,
    pub zero_quantity: bool,
}

/// Fold line items into per-name summaries.
///
/// Groups by exact, case-sensitive name; rows come out in first-seen input
/// order. Pure and deterministic, recomputed on every read, never persisted.
pub fn summarize(items: &[LineItem]) -> Vec<InventorySummary> {
    let mut rows: Vec<InventorySummary> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match index_by_name.get(item.name.as_str()) {
            Some(&at) => {
                rows[at].total_quantity += item.quantity;
                rows[at].total_value += item.price;
            }
            None => {
                index_by_name.insert(item.name.as_str(), rows.len());
                rows.push(InventorySummary {
                    name: item.name.clone(),
                    total_quantity: item.quantity,
                    total_value: item.price,
                    average_unit_price: 0.0,
                    zero_quantity: false,
                });
            }
        }
    }

    for row in &mut rows {
        if row.total_quantity == 0.0 {
            row.zero_quantity = true;
            row.average_unit_price = 0.0;
        } else {
            row.average_unit_price = row.total_value / row.total_quantity;
        }
    }

    rows
}
