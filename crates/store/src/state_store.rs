//! Storage seam for the tracker state.

use larder_core::LineItem;

use crate::error::StoreError;
use crate::schema::RejectedRecord;

/// What a load produces: the two decoded lists plus whatever strict decoding
/// excluded.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    pub purchases: Vec<LineItem>,
    pub submitted: Vec<LineItem>,
    pub rejected: Vec<RejectedRecord>,
}

/// Durable home of the tracker state.
///
/// `save` replaces the whole document; callers pass both lists together so
/// a commit (ledger append + draft clear) lands as one write.
pub trait StateStore {
    fn load(&self) -> Result<StateSnapshot, StoreError>;
    fn save(&mut self, purchases: &[LineItem], submitted: &[LineItem]) -> Result<(), StoreError>;
}

/// In-memory implementation for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    purchases: Vec<LineItem>,
    submitted: Vec<LineItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-existing state (load-path tests).
    pub fn with_state(purchases: Vec<LineItem>, submitted: Vec<LineItem>) -> Self {
        Self {
            purchases,
            submitted,
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<StateSnapshot, StoreError> {
        Ok(StateSnapshot {
            purchases: self.purchases.clone(),
            submitted: self.submitted.clone(),
            rejected: Vec::new(),
        })
    }

    fn save(&mut self, purchases: &[LineItem], submitted: &[LineItem]) -> Result<(), StoreError> {
        self.purchases = purchases.to_vec();
        self.submitted = submitted.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(name: &str) -> LineItem {
        LineItem::new(name, Some(10.0), 1.0, 10.0).unwrap()
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        store
            .save(&[test_item("Milk")], &[test_item("Apple")])
            .unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.purchases.len(), 1);
        assert_eq!(snapshot.submitted.len(), 1);
        assert_eq!(snapshot.purchases[0].name, "Milk");
        assert!(snapshot.rejected.is_empty());
    }

    #[test]
    fn save_replaces_the_whole_state() {
        let mut store = MemoryStore::with_state(vec![test_item("Milk")], vec![]);
        store.save(&[], &[test_item("Milk")]).unwrap();

        let snapshot = store.load().unwrap();
        assert!(snapshot.purchases.is_empty());
        assert_eq!(snapshot.submitted.len(), 1);
    }
}

