//! Monthly salary calculation.
//!
//! Turns a net monthly salary into the gross monthly salary a guard is
//! paid once rest days, worked holidays and the 31st day are included.

use rust_decimal::Decimal;

use crate::error::{EngineResult, ReferenceDataError, ReferenceTable};
use crate::models::AuditStep;

use super::rounding::{DAYS_PER_MONTH, DAYS_PER_YEAR, MONTHS_PER_YEAR, round_money};

/// Calendar holidays are paid double before being annualized.
pub const HOLIDAY_PAY_MULTIPLIER: u32 = 2;

/// Inputs to the monthly salary calculation.
#[derive(Debug, Clone)]
pub struct MonthlySalaryInput {
    /// Net monthly salary.
    pub net_salary: Decimal,
    /// Rest days worked per month.
    pub total_rest_days: u32,
    /// Whether calendar holidays are worked.
    pub has_holidays: bool,
    /// Whether the 31st day is paid.
    pub has_day_31: bool,
    /// Number of holidays in the calendar year.
    pub holiday_count: usize,
    /// Day-31 adjustment percentage, if one is on file.
    pub day_31_adjustment: Option<Decimal>,
}

/// The result of the monthly salary calculation.
#[derive(Debug, Clone)]
pub struct MonthlySalaryResult {
    /// `net_salary / 30`.
    pub daily_rate: Decimal,
    /// Pay for rest days worked.
    pub rest_days_pay: Decimal,
    /// Annualized holiday pay.
    pub holiday_pay: Decimal,
    /// Pay for the 31st day.
    pub day_31_pay: Decimal,
    /// `net_salary + rest_days_pay + holiday_pay + day_31_pay`.
    pub monthly_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the gross monthly salary.
///
/// - `rest_days_pay = daily_rate × total_rest_days`
/// - `holiday_pay = daily_rate × (holiday_count × 2 / 12)` when holidays are worked
/// - `day_31_pay = daily_rate × ((365/12 − 30) + adjustment)` when the 31st is paid
///
/// Fails with `MissingReferenceData` if the 31st is paid but no adjustment
/// is on file.
///
/// # Examples
///
/// ```
/// use quotation_engine::calculation::{MonthlySalaryInput, calculate_monthly_salary};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = MonthlySalaryInput {
///     net_salary: Decimal::from_str("9000.00").unwrap(),
///     total_rest_days: 8,
///     has_holidays: false,
///     has_day_31: false,
///     holiday_count: 7,
///     day_31_adjustment: None,
/// };
///
/// let result = calculate_monthly_salary(&input, 1).unwrap();
/// assert_eq!(result.rest_days_pay, Decimal::from_str("2400.00").unwrap());
/// assert_eq!(result.monthly_salary, Decimal::from_str("11400.00").unwrap());
/// ```
pub fn calculate_monthly_salary(
    input: &MonthlySalaryInput,
    step_number: u32,
) -> EngineResult<MonthlySalaryResult> {
    let daily_rate = round_money(input.net_salary / Decimal::from(DAYS_PER_MONTH));

    let rest_days_pay = round_money(daily_rate * Decimal::from(input.total_rest_days));

    let holiday_days = Decimal::from(input.holiday_count as u64 * HOLIDAY_PAY_MULTIPLIER as u64)
        / Decimal::from(MONTHS_PER_YEAR);
    let holiday_pay = if input.has_holidays {
        round_money(daily_rate * holiday_days)
    } else {
        Decimal::ZERO
    };

    let day_31_pay = if input.has_day_31 {
        let adjustment = input.day_31_adjustment.ok_or_else(|| {
            ReferenceDataError::missing(ReferenceTable::Day31Adjustments, "most recent year")
        })?;
        let extra_days = Decimal::from(DAYS_PER_YEAR) / Decimal::from(MONTHS_PER_YEAR)
            - Decimal::from(DAYS_PER_MONTH)
            + adjustment;
        round_money(daily_rate * extra_days)
    } else {
        Decimal::ZERO
    };

    let monthly_salary = input.net_salary + rest_days_pay + holiday_pay + day_31_pay;

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_salary".to_string(),
        rule_name: "Monthly Salary".to_string(),
        legal_ref: "LFT arts. 73, 74, 75".to_string(),
        input: serde_json::json!({
            "net_salary": input.net_salary.to_string(),
            "total_rest_days": input.total_rest_days,
            "has_holidays": input.has_holidays,
            "has_day_31": input.has_day_31,
            "holiday_count": input.holiday_count,
            "day_31_adjustment": input.day_31_adjustment.map(|a| a.to_string())
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.to_string(),
            "rest_days_pay": rest_days_pay.to_string(),
            "holiday_pay": holiday_pay.to_string(),
            "day_31_pay": day_31_pay.to_string(),
            "monthly_salary": monthly_salary.to_string()
        }),
        reasoning: format!(
            "${} net + ${} rest days + ${} holidays + ${} day 31 = ${}",
            input.net_salary, rest_days_pay, holiday_pay, day_31_pay, monthly_salary
        ),
    };

    Ok(MonthlySalaryResult {
        daily_rate,
        rest_days_pay,
        holiday_pay,
        day_31_pay,
        monthly_salary,
        audit_step,
    })
}
