//! Configuration loading and management for the Quotation Engine.
//!
//! This module loads the reference tables (labor benefits, social security,
//! income tax), the pricing policy, and read-only snapshots of the catalog
//! and uniform inventory from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use quotation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/guard_staffing").unwrap();
//! println!("Admin overhead: {}%", config.pricing().admin_expense_percent);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CatalogConfig, CatalogEntry, ContributionConcept, ContributionSchedule, FinancingSettings,
    Holiday, InventoryConfig, Invoice, LaborConfig, PricingSettings, ReferenceConfig, Region,
    RegionSurcharge, SeniorityBenefitRow, SocialSecurityConfig, TaxBracket, TaxConfig,
    UniformStockUnit, YearValue,
};
