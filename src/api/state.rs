//! Application state for the Quotation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{FolioGenerator, QuotationRecorder, QuotationStore, RandomFolio};

/// Shared application state.
///
/// Contains the loaded reference data and the quotation recorder. Clones
/// share both.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The loaded reference configuration.
    config: Arc<ConfigLoader>,
    /// Records priced quotations under unique folios.
    recorder: QuotationRecorder,
}

impl AppState {
    /// Creates application state with an empty store and random folios.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_folio_generator(config, Arc::new(RandomFolio))
    }

    /// Creates application state with a custom folio generator.
    pub fn with_folio_generator(config: ConfigLoader, generator: Arc<dyn FolioGenerator>) -> Self {
        let prefix = config.pricing().folio_prefix.clone();
        Self {
            config: Arc::new(config),
            recorder: QuotationRecorder::new(QuotationStore::new(), generator, prefix),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the quotation recorder.
    pub fn recorder(&self) -> &QuotationRecorder {
        &self.recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::new(ConfigLoader::load("./config/guard_staffing").unwrap());
        let other = state.clone();

        assert!(std::ptr::eq(
            state.config() as *const ConfigLoader,
            other.config() as *const ConfigLoader
        ));
        assert!(other.recorder().store().is_empty());
    }
}
