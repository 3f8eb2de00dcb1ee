//! Income tax and regional surcharge.
//!
//! Looks up the progressive bracket for the monthly salary and adds the
//! fixed surcharge configured for the region and business line. Neither
//! lookup is fatal: a missing row degrades to zero and leaves a warning.

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::error::ReferenceDataError;
use crate::models::{AuditStep, AuditWarning};

use super::rounding::{percent_of, round_money, round_whole};

/// Warning code when no bracket contains the monthly salary.
pub const TAX_BRACKET_NOT_FOUND: &str = "TAX_BRACKET_NOT_FOUND";

/// Warning code when no surcharge exists for the region and business line.
pub const REGION_SURCHARGE_NOT_FOUND: &str = "REGION_SURCHARGE_NOT_FOUND";

/// The result of the tax calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The bracket applied, if one matched.
    pub bracket: Option<TaxBracket>,
    /// Income tax, in whole currency units.
    pub isr: Decimal,
    /// Regional surcharge.
    pub region_tax: Decimal,
    /// `isr + region_tax`.
    pub state_tax: Decimal,
    /// Warnings for lookups that degraded to zero.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the income tax plus regional surcharge for a monthly salary.
///
/// `isr = round(excess × excess_percent / 100 + fixed_fee, 0)` where
/// `excess = monthly_salary − lower_limit`. The surcharge value is added
/// as-is.
///
/// # Examples
///
/// ```
/// use quotation_engine::calculation::calculate_income_tax;
/// use quotation_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = TaxBracket {
///     lower_limit: Decimal::from_str("11128.02").unwrap(),
///     upper_limit: Decimal::from_str("12935.82").unwrap(),
///     fixed_fee: Decimal::from_str("893.63").unwrap(),
///     excess_percent: Decimal::from_str("16.00").unwrap(),
/// };
///
/// let result = calculate_income_tax(
///     Decimal::from_str("11400.00").unwrap(),
///     Ok(&bracket),
///     Ok(Decimal::from_str("3.00").unwrap()),
///     4,
/// );
/// assert_eq!(result.isr, Decimal::from(937));
/// assert_eq!(result.state_tax, Decimal::from_str("940.00").unwrap());
/// ```
pub fn calculate_income_tax(
    monthly_salary: Decimal,
    bracket: Result<&TaxBracket, ReferenceDataError>,
    surcharge: Result<Decimal, ReferenceDataError>,
    step_number: u32,
) -> IncomeTaxResult {
    let mut warnings = Vec::new();

    let (bracket, isr) = match bracket {
        Ok(bracket) => {
            let excess = monthly_salary - bracket.lower_limit;
            let isr = round_whole(percent_of(excess, bracket.excess_percent) + bracket.fixed_fee);
            (Some(bracket.clone()), isr)
        }
        Err(err) => {
            tracing::warn!(error = %err, "No tax bracket matched; income tax set to zero");
            warnings.push(AuditWarning::new(TAX_BRACKET_NOT_FOUND, err.to_string(), "medium"));
            (None, Decimal::ZERO)
        }
    };

    let region_tax = match surcharge {
        Ok(value) => round_money(value),
        Err(err) => {
            tracing::warn!(error = %err, "No regional surcharge; using zero");
            warnings.push(AuditWarning::new(REGION_SURCHARGE_NOT_FOUND, err.to_string(), "low"));
            Decimal::ZERO
        }
    };

    let state_tax = isr + region_tax;

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax and Regional Surcharge".to_string(),
        legal_ref: "LISR art. 96".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "bracket": bracket.as_ref().map(|b| serde_json::json!({
                "lower_limit": b.lower_limit.to_string(),
                "upper_limit": b.upper_limit.to_string(),
                "fixed_fee": b.fixed_fee.to_string(),
                "excess_percent": b.excess_percent.to_string()
            }))
        }),
        output: serde_json::json!({
            "isr": isr.to_string(),
            "region_tax": region_tax.to_string(),
            "state_tax": state_tax.to_string()
        }),
        reasoning: match &bracket {
            Some(b) => format!(
                "(${} − ${}) × {}% + ${} = ${} income tax; + ${} surcharge = ${}",
                monthly_salary,
                b.lower_limit,
                b.excess_percent,
                b.fixed_fee,
                isr,
                region_tax,
                state_tax
            ),
            None => format!(
                "No bracket for ${}; income tax 0 + ${} surcharge = ${}",
                monthly_salary, region_tax, state_tax
            ),
        },
    };

    IncomeTaxResult {
        bracket,
        isr,
        region_tax,
        state_tax,
        warnings,
        audit_step,
    }
}
