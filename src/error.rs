//! Error types for the Quotation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing a quotation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The request field that failed validation (e.g., `uniforms[0].quantity`).
    pub field: String,
    /// A description of what made the field invalid.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A reference table consulted during a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTable {
    /// Vacation / year-end bonus schedule by years of service.
    SeniorityBenefits,
    /// Wage unit (UMA) value by year.
    WageUnitValues,
    /// Base daily salary by year.
    BaseDailySalaries,
    /// Occupational-risk premium rate by year.
    RiskPremiums,
    /// Employer social-security contribution schedule.
    ContributionRates,
    /// Progressive income-tax brackets.
    TaxBrackets,
    /// Region / business-line surcharge.
    RegionSurcharges,
    /// Holiday calendar.
    Holidays,
    /// Day-31 adjustment factor by year.
    Day31Adjustments,
}

impl std::fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReferenceTable::SeniorityBenefits => "seniority_benefits",
            ReferenceTable::WageUnitValues => "wage_unit_values",
            ReferenceTable::BaseDailySalaries => "base_daily_salaries",
            ReferenceTable::RiskPremiums => "risk_premiums",
            ReferenceTable::ContributionRates => "contribution_rates",
            ReferenceTable::TaxBrackets => "tax_brackets",
            ReferenceTable::RegionSurcharges => "region_surcharges",
            ReferenceTable::Holidays => "holidays",
            ReferenceTable::Day31Adjustments => "day_31_adjustments",
        };
        f.write_str(name)
    }
}

/// Error returned by every reference-data lookup.
///
/// Lookups never decide whether a missing row is fatal; the pricing
/// pipeline does, per field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceDataError {
    /// No row matched the lookup key.
    #[error("No {table} row found for {key}")]
    Missing {
        /// The table that was consulted.
        table: ReferenceTable,
        /// A description of the lookup key.
        key: String,
    },
}

impl ReferenceDataError {
    /// Creates a missing-row error.
    pub fn missing(table: ReferenceTable, key: impl Into<String>) -> Self {
        ReferenceDataError::Missing {
            table,
            key: key.into(),
        }
    }

    /// Returns the table the lookup was made against.
    pub fn table(&self) -> ReferenceTable {
        match self {
            ReferenceDataError::Missing { table, .. } => *table,
        }
    }
}

/// The main error type for the Quotation Engine.
///
/// # Example
///
/// ```
/// use quotation_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its contents are inconsistent.
    #[error("Invalid reference data in '{table}': {message}")]
    InvalidReferenceData {
        /// The table or file that failed validation.
        table: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// The request failed validation.
    #[error("Validation failed: {}", format_field_errors(.errors))]
    Validation {
        /// Every field that failed validation.
        errors: Vec<FieldError>,
    },

    /// A reference row required by the calculation does not exist.
    #[error("Missing reference data: {0}")]
    MissingReferenceData(#[from] ReferenceDataError),

    /// The generated folio already exists in the quotation store.
    #[error("Folio '{folio}' is already in use")]
    PersistenceConflict {
        /// The folio that collided.
        folio: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error for a single field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_validation_lists_every_field() {
        let error = EngineError::Validation {
            errors: vec![
                FieldError::new("uniforms", "must contain at least one line"),
                FieldError::new("total_elements", "must be at least 1"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Validation failed: uniforms: must contain at least one line; total_elements: must be at least 1"
        );
    }

    #[test]
    fn test_missing_reference_data_displays_table_and_key() {
        let error: EngineError =
            ReferenceDataError::missing(ReferenceTable::SeniorityBenefits, "years_of_service = 1")
                .into();
        assert_eq!(
            error.to_string(),
            "Missing reference data: No seniority_benefits row found for years_of_service = 1"
        );
    }

    #[test]
    fn test_reference_error_reports_table() {
        let error = ReferenceDataError::missing(ReferenceTable::TaxBrackets, "salary 0");
        assert_eq!(error.table(), ReferenceTable::TaxBrackets);
    }

    #[test]
    fn test_persistence_conflict_displays_folio() {
        let error = EngineError::PersistenceConflict {
            folio: "COT-20250101-ABCD1234".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Folio 'COT-20250101-ABCD1234' is already in use"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<ReferenceDataError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn lookup() -> Result<(), ReferenceDataError> {
            Err(ReferenceDataError::missing(
                ReferenceTable::WageUnitValues,
                "latest year",
            ))
        }

        fn propagates_error() -> EngineResult<()> {
            lookup()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::MissingReferenceData(_))
        ));
    }
}
