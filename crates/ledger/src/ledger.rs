//! The committed ledger.

use larder_core::LineItem;

/// Append-only sequence of committed line items.
///
/// The ledger never deduplicates: committing the same product twice yields
/// two entries, and reconciling them is the inventory projection's job. No
/// update or delete operations exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<LineItem>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from already-validated entries (load path).
    pub fn from_entries(entries: Vec<LineItem>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenate the items onto the end, preserving their order.
    pub fn append(&mut self, items: impl IntoIterator<Item = LineItem>) {
        self.entries.extend(items);
    }

    /// Grand total of the committed entry prices.
    pub fn total_amount(&self) -> f64 {
        self.entries.iter().map(|entry| entry.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(name: &str, quantity: f64, price: f64) -> LineItem {
        LineItem::new(name, None, quantity, price).unwrap()
    }

    #[test]
    fn append_preserves_order_and_keeps_duplicates() {
        let mut ledger = Ledger::new();
        ledger.append(vec![
            test_item("Milk", 3.0, 60.0),
            test_item("Curd", 2.0, 50.0),
        ]);
        ledger.append(vec![test_item("Milk", 2.0, 40.0)]);

        let names: Vec<&str> = ledger.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Curd", "Milk"]);
    }

    #[test]
    fn length_grows_by_the_appended_count() {
        let mut ledger = Ledger::new();
        ledger.append(vec![test_item("Milk", 3.0, 60.0)]);
        let before = ledger.len();
        ledger.append(vec![
            test_item("Apple", 1.0, 100.0),
            test_item("Banana", 2.0, 60.0),
        ]);
        assert_eq!(ledger.len(), before + 2);
    }

    #[test]
    fn appending_nothing_changes_nothing() {
        let mut ledger = Ledger::from_entries(vec![test_item("Milk", 3.0, 60.0)]);
        ledger.append(Vec::new());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn total_amount_sums_entry_prices() {
        let mut ledger = Ledger::new();
        ledger.append(vec![
            test_item("Milk", 3.0, 60.0),
            test_item("Milk", 2.0, 40.0),
        ]);
        assert_eq!(ledger.total_amount(), 100.0);
    }

    #[test]
    fn empty_ledger_totals_zero() {
        assert_eq!(Ledger::new().total_amount(), 0.0);
    }
}

