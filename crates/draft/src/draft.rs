//! The uncommitted draft.

use larder_core::{DomainError, DomainResult, LineItem, LineItemId};

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Replaced,
}

/// Ordered collection of uncommitted line items, addressed by id.
///
/// Items keep their insertion order; replacing an item keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    items: Vec<LineItem>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a draft from already-validated items (load path).
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validate and add the item, or replace the existing item carrying the
    /// same id in place.
    pub fn upsert(&mut self, item: LineItem) -> DomainResult<UpsertOutcome> {
        item.validate()?;
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                Ok(UpsertOutcome::Replaced)
            }
            None => {
                self.items.push(item);
                Ok(UpsertOutcome::Added)
            }
        }
    }

    pub fn get(&self, id: LineItemId) -> DomainResult<&LineItem> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(DomainError::UnknownItem(id))
    }

    /// Zero-based positional access with an explicit bounds check.
    pub fn item_at(&self, index: usize) -> DomainResult<&LineItem> {
        self.items
            .get(index)
            .ok_or(DomainError::OutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// Remove exactly one item by id; later items shift down.
    pub fn remove(&mut self, id: LineItemId) -> DomainResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(DomainError::UnknownItem(id))?;
        Ok(self.items.remove(index))
    }

    /// Remove exactly one item by position; later items shift down.
    pub fn remove_at(&mut self, index: usize) -> DomainResult<LineItem> {
        if index >= self.items.len() {
            return Err(DomainError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Drain every item in order, leaving the draft empty (commit support).
    pub fn take_all(&mut self) -> Vec<LineItem> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_item(name: &str, quantity: f64) -> LineItem {
        LineItem::new(name, Some(10.0), quantity, quantity * 10.0).unwrap()
    }

    #[test]
    fn upsert_appends_new_items_in_order() {
        let mut draft = Draft::new();
        assert_eq!(draft.upsert(test_item("Milk", 3.0)).unwrap(), UpsertOutcome::Added);
        assert_eq!(draft.upsert(test_item("Curd", 2.0)).unwrap(), UpsertOutcome::Added);

        let names: Vec<&str> = draft.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Curd"]);
    }

    #[test]
    fn upsert_replaces_in_place_when_the_id_matches() {
        let mut draft = Draft::new();
        let first = test_item("Milk", 3.0);
        let id = first.id;
        draft.upsert(first).unwrap();
        draft.upsert(test_item("Curd", 2.0)).unwrap();

        let edited = LineItem::with_id(id, "Milk", Some(20.0), 5.0, 100.0).unwrap();
        assert_eq!(draft.upsert(edited).unwrap(), UpsertOutcome::Replaced);

        assert_eq!(draft.len(), 2);
        assert_eq!(draft.items()[0].quantity, 5.0);
        assert_eq!(draft.items()[0].price, 100.0);
        assert_eq!(draft.items()[1].name, "Curd");
    }

    #[test]
    fn upsert_rejects_invalid_items() {
        let mut draft = Draft::new();
        let mut bad = test_item("Milk", 3.0);
        bad.quantity = 0.0;
        match draft.upsert(bad) {
            Err(DomainError::InvalidInput(_)) => {}
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(draft.is_empty());
    }

    #[test]
    fn get_by_unknown_id_fails() {
        let draft = Draft::new();
        let id = LineItemId::new();
        match draft.get(id) {
            Err(DomainError::UnknownItem(unknown)) => assert_eq!(unknown, id),
            other => panic!("Expected UnknownItem, got {other:?}"),
        }
    }

    #[test]
    fn positional_access_is_bounds_checked() {
        let mut draft = Draft::new();
        draft.upsert(test_item("Milk", 3.0)).unwrap();
        match draft.item_at(1) {
            Err(DomainError::OutOfRange { index: 1, len: 1 }) => {}
            other => panic!("Expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn remove_deletes_exactly_one_and_preserves_order() {
        let mut draft = Draft::new();
        let first = test_item("Milk", 3.0);
        let first_id = first.id;
        draft.upsert(first).unwrap();
        draft.upsert(test_item("Curd", 2.0)).unwrap();
        draft.upsert(test_item("Apple", 1.0)).unwrap();

        let removed = draft.remove(first_id).unwrap();
        assert_eq!(removed.name, "Milk");

        let names: Vec<&str> = draft.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Curd", "Apple"]);
    }

    #[test]
    fn remove_at_shifts_later_items_down() {
        let mut draft = Draft::new();
        draft.upsert(test_item("Milk", 3.0)).unwrap();
        draft.upsert(test_item("Curd", 2.0)).unwrap();

        draft.remove_at(0).unwrap();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.items()[0].name, "Curd");

        match draft.remove_at(5) {
            Err(DomainError::OutOfRange { index: 5, len: 1 }) => {}
            other => panic!("Expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn take_all_drains_in_order() {
        let mut draft = Draft::new();
        draft.upsert(test_item("Milk", 3.0)).unwrap();
        draft.upsert(test_item("Curd", 2.0)).unwrap();

        let taken = draft.take_all();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].name, "Milk");
        assert!(draft.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: removing any single position preserves the relative
        /// order of the remaining items.
        #[test]
        fn removal_preserves_relative_order(
            quantities in prop::collection::vec(1u32..100u32, 2..12),
            victim in 0usize..12usize,
        ) {
            let mut draft = Draft::new();
            for (i, q) in quantities.iter().enumerate() {
                draft.upsert(test_item(&format!("item-{i}"), f64::from(*q))).unwrap();
            }
            let victim = victim % draft.len();
            let before: Vec<String> = draft.items().iter().map(|i| i.name.clone()).collect();

            draft.remove_at(victim).unwrap();

            let mut expected = before;
            expected.remove(victim);
            let after: Vec<String> = draft.items().iter().map(|i| i.name.clone()).collect();
            prop_assert_eq!(after, expected);
        }
    }
}


