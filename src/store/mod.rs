//! In-memory quotation store.
//!
//! Recorded quotations are kept in a [`QuotationStore`] keyed by folio.
//! Folio assignment and insertion run inside one [`StoreTransaction`], which
//! holds the write lock until it is committed or dropped.

mod folio;
mod recorder;

pub use folio::{FolioGenerator, RandomFolio};
pub use recorder::QuotationRecorder;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::Quotation;

/// Thread-safe quotation storage.
///
/// Clones share the same underlying map. The lock is never held across an
/// `.await`, so `parking_lot` is used rather than `tokio::sync`.
#[derive(Debug, Clone, Default)]
pub struct QuotationStore {
    data: Arc<RwLock<HashMap<String, Quotation>>>,
}

impl QuotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a write transaction.
    ///
    /// The write lock is held until the transaction is committed or dropped.
    pub fn begin(&self) -> StoreTransaction<'_> {
        StoreTransaction {
            guard: self.data.write(),
            staged: None,
        }
    }

    /// Returns a copy of the quotation recorded under `folio`.
    pub fn get(&self, folio: &str) -> Option<Quotation> {
        self.data.read().get(folio).cloned()
    }

    /// Returns whether a folio is already taken.
    pub fn contains(&self, folio: &str) -> bool {
        self.data.read().contains_key(folio)
    }

    /// Number of recorded quotations.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

/// A scoped write over the quotation store.
///
/// Nothing staged becomes visible unless [`commit`](Self::commit) is called.
pub struct StoreTransaction<'a> {
    guard: RwLockWriteGuard<'a, HashMap<String, Quotation>>,
    staged: Option<Quotation>,
}

impl StoreTransaction<'_> {
    /// Stages a quotation for insertion.
    ///
    /// Fails with [`EngineError::PersistenceConflict`] if the folio is
    /// already recorded or already staged in this transaction.
    pub fn stage(&mut self, quotation: Quotation) -> EngineResult<()> {
        let taken = self.guard.contains_key(&quotation.folio)
            || self
                .staged
                .as_ref()
                .is_some_and(|staged| staged.folio == quotation.folio);
        if taken {
            return Err(EngineError::PersistenceConflict {
                folio: quotation.folio,
            });
        }
        self.staged = Some(quotation);
        Ok(())
    }

    /// Inserts the staged quotation and releases the lock.
    ///
    /// Returns the recorded quotation, or `None` if nothing was staged.
    pub fn commit(mut self) -> Option<Quotation> {
        let quotation = self.staged.take()?;
        self.guard
            .insert(quotation.folio.clone(), quotation.clone());
        Some(quotation)
    }
}
