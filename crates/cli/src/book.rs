//! Application service tying draft, ledger and store together.

use thiserror::Error;
use tracing::{debug, info};

use larder_core::{DomainError, LineItem, LineItemId};
use larder_draft::Draft;
use larder_inventory::{InventorySummary, summarize};
use larder_ledger::Ledger;
use larder_store::{RejectedRecord, StateStore, StoreError};

/// Service-level error: deterministic domain failures plus persistence
/// failures. Either way the failure is local to one action.
#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Receipt for a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    pub committed: usize,
    pub ledger_len: usize,
}

/// The purchase book: the store handle plus the in-memory draft and ledger.
///
/// Mutating methods take `&mut self` and persist the full state before
/// returning. State is swapped in only after the save succeeds, so a failed
/// save leaves memory unchanged and the action can simply be retried.
pub struct PurchaseBook<S: StateStore> {
    store: S,
    draft: Draft,
    ledger: Ledger,
    rejected: Vec<RejectedRecord>,
}

impl<S: StateStore> PurchaseBook<S> {
    /// Load the persisted state through the store handle.
    pub fn open(store: S) -> Result<Self, BookError> {
        let snapshot = store.load()?;
        debug!(
            draft = snapshot.purchases.len(),
            ledger = snapshot.submitted.len(),
            rejected = snapshot.rejected.len(),
            "state loaded"
        );
        Ok(Self {
            store,
            draft: Draft::from_items(snapshot.purchases),
            ledger: Ledger::from_entries(snapshot.submitted),
            rejected: snapshot.rejected,
        })
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Records excluded by strict decoding when the state was loaded.
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// Resolve a zero-based draft position to the stable item id.
    pub fn id_at(&self, index: usize) -> Result<LineItemId, BookError> {
        Ok(self.draft.item_at(index)?.id)
    }

    /// Read one draft item by id (edit re-population).
    pub fn get(&self, id: LineItemId) -> Result<&LineItem, BookError> {
        Ok(self.draft.get(id)?)
    }

    /// Read one draft item by zero-based position.
    pub fn item_at(&self, index: usize) -> Result<&LineItem, BookError> {
        Ok(self.draft.item_at(index)?)
    }

    /// Add a new draft item, or replace the one carrying the same id.
    pub fn upsert(&mut self, item: LineItem) -> Result<(), BookError> {
        let mut next = self.draft.clone();
        next.upsert(item)?;
        self.persist_draft(next)
    }

    /// Re-derive the price for a new quantity and replace the item under its
    /// id.
    pub fn update_quantity(
        &mut self,
        id: LineItemId,
        quantity: f64,
    ) -> Result<LineItem, BookError> {
        let current = self.draft.get(id)?;
        let unit_price = current.effective_unit_price();
        let updated = LineItem::with_id(
            id,
            current.name.clone(),
            Some(unit_price),
            quantity,
            quantity * unit_price,
        )?;

        let mut next = self.draft.clone();
        next.upsert(updated.clone())?;
        self.persist_draft(next)?;
        Ok(updated)
    }

    /// Remove one draft item by id.
    pub fn remove(&mut self, id: LineItemId) -> Result<LineItem, BookError> {
        let mut next = self.draft.clone();
        let removed = next.remove(id)?;
        self.persist_draft(next)?;
        Ok(removed)
    }

    /// Remove one draft item by zero-based position.
    pub fn remove_at(&mut self, index: usize) -> Result<LineItem, BookError> {
        let mut next = self.draft.clone();
        let removed = next.remove_at(index)?;
        self.persist_draft(next)?;
        Ok(removed)
    }

    /// Move every draft item onto the ledger and clear the draft, persisted
    /// as one write. Committing an empty draft is an error.
    pub fn commit(&mut self) -> Result<CommitReceipt, BookError> {
        if self.draft.is_empty() {
            return Err(DomainError::invalid_input("nothing to commit: draft is empty").into());
        }

        let mut next_draft = self.draft.clone();
        let mut next_ledger = self.ledger.clone();
        let items = next_draft.take_all();
        let committed = items.len();
        next_ledger.append(items);

        self.store.save(next_draft.items(), next_ledger.entries())?;
        self.draft = next_draft;
        self.ledger = next_ledger;

        info!(committed, ledger_len = self.ledger.len(), "draft committed");
        Ok(CommitReceipt {
            committed,
            ledger_len: self.ledger.len(),
        })
    }

    /// Aggregated view over the committed ledger.
    pub fn summary(&self) -> Vec<InventorySummary> {
        summarize(self.ledger.entries())
    }

    /// Grand total of the committed entry prices.
    pub fn total_amount(&self) -> f64 {
        self.ledger.total_amount()
    }

    fn persist_draft(&mut self, next: Draft) -> Result<(), BookError> {
        self.store.save(next.items(), self.ledger.entries())?;
        self.draft = next;
        debug!(len = self.draft.len(), "draft persisted");
        Ok(())
    }
}
