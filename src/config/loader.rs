//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading reference
//! tables, the catalog and the inventory snapshot from YAML files, and the
//! read-only lookups the pricing pipeline performs against them.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineResult, EngineError, ReferenceDataError, ReferenceTable};

use super::types::{
    CatalogConfig, CatalogEntry, ContributionSchedule, InventoryConfig, LaborConfig,
    PricingSettings, ReferenceConfig, Region, SeniorityBenefitRow, SocialSecurityConfig,
    TaxBracket, TaxConfig, YearValue,
};

/// Loads and provides access to quotation reference data.
///
/// # Directory Structure
///
/// ```text
/// config/guard_staffing/
/// ├── pricing.yaml          # Overhead, margin and financing policy
/// ├── labor.yaml            # Seniority benefits, holidays, day-31 factor
/// ├── social_security.yaml  # Wage unit, base salary, risk premium, contribution rates
/// ├── tax.yaml              # Income-tax brackets and regional surcharges
/// ├── catalog.yaml          # Business lines, shift types, regions, garment catalogs
/// └── inventory.yaml        # Invoices and uniform stock units
/// ```
///
/// # Example
///
/// ```no_run
/// use quotation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/guard_staffing").unwrap();
/// let uma = loader.wage_unit_value().unwrap();
/// println!("Wage unit for {}: {}", uma.year, uma.value);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ReferenceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing, is not valid YAML, or
    /// fails the load-time consistency checks of [`ReferenceConfig::new`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let pricing = Self::load_yaml::<PricingSettings>(&path.join("pricing.yaml"))?;
        let labor = Self::load_yaml::<LaborConfig>(&path.join("labor.yaml"))?;
        let social_security =
            Self::load_yaml::<SocialSecurityConfig>(&path.join("social_security.yaml"))?;
        let tax = Self::load_yaml::<TaxConfig>(&path.join("tax.yaml"))?;
        let catalog = Self::load_yaml::<CatalogConfig>(&path.join("catalog.yaml"))?;
        let inventory = Self::load_yaml::<InventoryConfig>(&path.join("inventory.yaml"))?;

        let config =
            ReferenceConfig::new(pricing, labor, social_security, tax, catalog, inventory)?;

        tracing::debug!(
            path = %path.display(),
            brackets = config.tax().brackets.len(),
            stock_units = config.inventory().stock.len(),
            "Loaded reference configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ReferenceConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying reference configuration.
    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// Returns the pricing policy.
    pub fn pricing(&self) -> &PricingSettings {
        self.config.pricing()
    }

    /// Gets the benefit schedule row for the given years of service.
    pub fn seniority_benefit(&self, years: u32) -> Result<&SeniorityBenefitRow, ReferenceDataError> {
        self.config
            .labor()
            .seniority_benefits
            .iter()
            .find(|row| row.years_of_service == years)
            .ok_or_else(|| {
                ReferenceDataError::missing(
                    ReferenceTable::SeniorityBenefits,
                    format!("years_of_service = {}", years),
                )
            })
    }

    /// Gets the most recent wage unit value.
    pub fn wage_unit_value(&self) -> Result<&YearValue, ReferenceDataError> {
        latest(
            &self.config.social_security().wage_unit_values,
            ReferenceTable::WageUnitValues,
        )
    }

    /// Gets the most recent base daily salary.
    pub fn base_daily_salary(&self) -> Result<&YearValue, ReferenceDataError> {
        latest(
            &self.config.social_security().base_daily_salaries,
            ReferenceTable::BaseDailySalaries,
        )
    }

    /// Gets the most recent occupational-risk premium rate.
    pub fn risk_premium_rate(&self) -> Result<&YearValue, ReferenceDataError> {
        latest(
            &self.config.social_security().risk_premiums,
            ReferenceTable::RiskPremiums,
        )
    }

    /// Gets the most recent day-31 adjustment percentage.
    pub fn day_31_adjustment(&self) -> Result<&YearValue, ReferenceDataError> {
        latest(
            &self.config.labor().day_31_adjustments,
            ReferenceTable::Day31Adjustments,
        )
    }

    /// Counts the holidays in the most recent calendar year on file.
    pub fn holiday_count(&self) -> usize {
        self.config.latest_holidays().len()
    }

    /// Returns the validated contribution schedule.
    pub fn contribution_schedule(&self) -> &ContributionSchedule {
        self.config.contribution_schedule()
    }

    /// Finds the income-tax bracket for the given monthly amount.
    ///
    /// Brackets are sorted by lower limit, so an amount belongs to the last
    /// bracket starting at or below it. Amounts between one bracket's upper
    /// limit and the next lower limit stay in the earlier bracket; only the
    /// top bracket's upper limit is enforced.
    pub fn tax_bracket(&self, amount: Decimal) -> Result<&TaxBracket, ReferenceDataError> {
        let brackets = &self.config.tax().brackets;
        let next = brackets.partition_point(|b| b.lower_limit <= amount);
        next.checked_sub(1)
            .map(|index| &brackets[index])
            .filter(|bracket| next < brackets.len() || amount <= bracket.upper_limit)
            .ok_or_else(|| {
                ReferenceDataError::missing(
                    ReferenceTable::TaxBrackets,
                    format!("monthly amount {}", amount),
                )
            })
    }

    /// Gets the surcharge configured for a region and business line.
    pub fn region_surcharge(
        &self,
        region_id: &str,
        business_line_id: u32,
    ) -> Result<Decimal, ReferenceDataError> {
        self.config
            .tax()
            .region_surcharges
            .iter()
            .find(|s| s.region_id == region_id && s.business_line_id == business_line_id)
            .map(|s| s.amount)
            .ok_or_else(|| {
                ReferenceDataError::missing(
                    ReferenceTable::RegionSurcharges,
                    format!("region '{}' and business line {}", region_id, business_line_id),
                )
            })
    }

    /// Finds a business line in the catalog.
    pub fn business_line(&self, id: u32) -> Option<&CatalogEntry> {
        find_entry(&self.config.catalog().business_lines, id)
    }

    /// Finds a shift type in the catalog.
    pub fn shift_type(&self, id: u32) -> Option<&CatalogEntry> {
        find_entry(&self.config.catalog().shift_types, id)
    }

    /// Finds a federal entity in the catalog.
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.config.catalog().regions.iter().find(|r| r.id == id)
    }

    /// Returns the display name of a garment type, or a placeholder.
    pub fn uniform_type_name(&self, id: u32) -> String {
        entry_name(&self.config.catalog().uniform_types, id)
    }

    /// Returns the display name of a size, or a placeholder.
    pub fn size_name(&self, id: u32) -> String {
        entry_name(&self.config.catalog().sizes, id)
    }

    /// Returns the display name of a color, or a placeholder.
    pub fn color_name(&self, id: u32) -> String {
        entry_name(&self.config.catalog().colors, id)
    }

    /// Returns the inventory snapshot.
    pub fn inventory(&self) -> &InventoryConfig {
        self.config.inventory()
    }
}

/// Year-scoped tables are sorted oldest first, so the last row is the latest.
fn latest(rows: &[YearValue], table: ReferenceTable) -> Result<&YearValue, ReferenceDataError> {
    rows.last()
        .ok_or_else(|| ReferenceDataError::missing(table, "most recent year"))
}

fn find_entry(entries: &[CatalogEntry], id: u32) -> Option<&CatalogEntry> {
    entries.iter().find(|e| e.id == id)
}

fn entry_name(entries: &[CatalogEntry], id: u32) -> String {
    find_entry(entries, id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/guard_staffing"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.pricing().admin_expense_percent, dec("10"));
        assert_eq!(loader.pricing().utility_percent, dec("15"));
        assert_eq!(loader.pricing().financing.window_days, 60);
    }

    #[test]
    fn test_seniority_row_for_first_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let row = loader.seniority_benefit(1).unwrap();
        assert_eq!(row.vacation_days, 12);
        assert_eq!(row.christmas_bonus_days, 15);
        assert_eq!(row.vacation_premium_percent, dec("25"));
    }

    #[test]
    fn test_seniority_row_missing_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let err = loader.seniority_benefit(99).unwrap_err();
        assert_eq!(err.table(), ReferenceTable::SeniorityBenefits);
    }

    #[test]
    fn test_year_scoped_values_use_latest_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let uma = loader.wage_unit_value().unwrap();
        assert_eq!(uma.year, 2025);
        assert_eq!(uma.value, dec("113.14"));

        let base = loader.base_daily_salary().unwrap();
        assert_eq!(base.year, 2025);
        assert_eq!(base.value, dec("278.80"));
    }

    #[test]
    fn test_holiday_count_uses_latest_calendar_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.holiday_count(), 7);
    }

    #[test]
    fn test_tax_bracket_lookup_inclusive_bounds() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let bracket = loader.tax_bracket(dec("11128.02")).unwrap();
        assert_eq!(bracket.fixed_fee, dec("893.63"));

        let bracket = loader.tax_bracket(dec("12935.82")).unwrap();
        assert_eq!(bracket.fixed_fee, dec("893.63"));
    }

    #[test]
    fn test_tax_bracket_covers_gap_between_rows() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        // 11128.015 sits between the 11128.01 upper limit and the 11128.02 lower limit.
        let bracket = loader.tax_bracket(dec("11128.015")).unwrap();
        assert_eq!(bracket.fixed_fee, dec("371.83"));

        let bracket = loader.tax_bracket(dec("746.045")).unwrap();
        assert_eq!(bracket.fixed_fee, dec("0.00"));
    }

    #[test]
    fn test_tax_bracket_outside_table_is_missing() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let err = loader.tax_bracket(Decimal::ZERO).unwrap_err();
        assert_eq!(err.table(), ReferenceTable::TaxBrackets);

        let err = loader.tax_bracket(dec("100000000000.00")).unwrap_err();
        assert_eq!(err.table(), ReferenceTable::TaxBrackets);
    }

    #[test]
    fn test_region_surcharge_lookup() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.region_surcharge("CDMX", 1).unwrap(), dec("3.00"));
        assert!(loader.region_surcharge("YUC", 1).is_err());
    }

    #[test]
    fn test_catalog_lookups() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert!(loader.business_line(1).is_some());
        assert!(loader.business_line(999).is_none());
        assert!(loader.shift_type(1).is_some());
        assert!(loader.region("CDMX").is_some());
        assert_eq!(loader.uniform_type_name(1), "Shirt");
        assert_eq!(loader.color_name(999), "#999");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("pricing.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other.err()),
        }
    }
}
