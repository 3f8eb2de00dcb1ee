//! Quotation recording.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{EngineError, EngineResult};
use crate::models::{Quotation, QuotationDraft};

use super::{FolioGenerator, QuotationStore};

/// Number of folios tried before a collision is surfaced.
const FOLIO_ATTEMPTS: usize = 2;

/// Assigns folios to priced drafts and records them.
#[derive(Clone)]
pub struct QuotationRecorder {
    store: QuotationStore,
    generator: Arc<dyn FolioGenerator>,
    prefix: String,
}

impl QuotationRecorder {
    /// Creates a recorder writing to `store`.
    pub fn new(
        store: QuotationStore,
        generator: Arc<dyn FolioGenerator>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            prefix: prefix.into(),
        }
    }

    /// Records a draft under a freshly generated folio.
    ///
    /// A folio collision is retried once with a new folio. If that also
    /// collides, [`EngineError::PersistenceConflict`] is returned and nothing
    /// is recorded.
    pub fn record(&self, draft: QuotationDraft) -> EngineResult<Quotation> {
        let mut last_conflict = None;

        for attempt in 1..=FOLIO_ATTEMPTS {
            let created_at = Utc::now();
            let folio = self.generator.next_folio(&self.prefix, created_at);

            let mut tx = self.store.begin();
            match tx.stage(Quotation::new(folio, created_at, draft.clone())) {
                Ok(()) => {
                    if let Some(quotation) = tx.commit() {
                        tracing::info!(
                            folio = %quotation.folio,
                            sale_price = %quotation.draft.sale_price,
                            "Quotation recorded"
                        );
                        return Ok(quotation);
                    }
                }
                Err(EngineError::PersistenceConflict { folio }) => {
                    tracing::warn!(folio = %folio, attempt, "Folio collision");
                    last_conflict = Some(folio);
                }
                Err(err) => return Err(err),
            }
        }

        let folio = last_conflict.unwrap_or_default();
        tracing::error!(folio = %folio, "Could not assign a unique folio");
        Err(EngineError::PersistenceConflict { folio })
    }

    /// Returns a recorded quotation.
    pub fn get(&self, folio: &str) -> Option<Quotation> {
        self.store.get(folio)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &QuotationStore {
        &self.store
    }
}

impl std::fmt::Debug for QuotationRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotationRecorder")
            .field("store", &self.store)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RandomFolio;
    use crate::store::tests::sample_draft;
    use chrono::{DateTime, Utc};
    use parking_lot::Mutex;

    /// Hands out a fixed sequence of folios, then repeats the last one.
    struct ScriptedFolio {
        folios: Mutex<Vec<&'static str>>,
    }

    impl ScriptedFolio {
        fn new(folios: &[&'static str]) -> Arc<Self> {
            let mut folios = folios.to_vec();
            folios.reverse();
            Arc::new(Self {
                folios: Mutex::new(folios),
            })
        }
    }

    impl FolioGenerator for ScriptedFolio {
        fn next_folio(&self, _prefix: &str, _created_at: DateTime<Utc>) -> String {
            let mut folios = self.folios.lock();
            if folios.len() > 1 {
                folios.pop().unwrap_or_default().to_string()
            } else {
                folios.last().copied().unwrap_or_default().to_string()
            }
        }
    }

    #[test]
    fn test_record_assigns_folio_and_persists() {
        let recorder = QuotationRecorder::new(QuotationStore::new(), Arc::new(RandomFolio), "COT");

        let quotation = recorder.record(sample_draft()).unwrap();

        assert!(quotation.folio.starts_with("COT-"));
        assert_eq!(recorder.get(&quotation.folio).unwrap(), quotation);
    }

    #[test]
    fn test_collision_is_retried_with_fresh_folio() {
        let store = QuotationStore::new();
        let first = QuotationRecorder::new(store.clone(), ScriptedFolio::new(&["A"]), "COT");
        first.record(sample_draft()).unwrap();

        let second = QuotationRecorder::new(store.clone(), ScriptedFolio::new(&["A", "B"]), "COT");
        let quotation = second.record(sample_draft()).unwrap();

        assert_eq!(quotation.folio, "B");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_second_collision_surfaces_conflict() {
        let store = QuotationStore::new();
        let first = QuotationRecorder::new(store.clone(), ScriptedFolio::new(&["A"]), "COT");
        first.record(sample_draft()).unwrap();

        let result = first.record(sample_draft());

        assert!(matches!(
            result,
            Err(EngineError::PersistenceConflict { ref folio }) if folio == "A"
        ));
        assert_eq!(store.len(), 1);
    }
}
