//! Statutory benefit accruals.
//!
//! Vacation pay, vacation premium, year-end bonus and seniority premium are
//! accrued monthly as day-count percentages of the monthly salary.

use rust_decimal::Decimal;

use crate::config::SeniorityBenefitRow;
use crate::models::AuditStep;

use super::rounding::{days_as_year_percent, percent_of, round_money, round_percent};

/// The result of the statutory benefits calculation.
#[derive(Debug, Clone)]
pub struct StatutoryBenefitsResult {
    /// `vacation_days / 365 × 100`.
    pub vacation_percent: Decimal,
    /// Vacation pay accrual.
    pub vacations: Decimal,
    /// `vacation_percent × vacation_premium_percent / 100`.
    pub vacation_premium_percent: Decimal,
    /// Vacation premium accrual.
    pub vacation_premium: Decimal,
    /// `christmas_bonus_days / 365 × 100`.
    pub christmas_percent: Decimal,
    /// Year-end bonus accrual.
    pub christmas_bonus: Decimal,
    /// Seniority premium percentage; tracks vacation accrual.
    pub seniority_percent: Decimal,
    /// Seniority premium accrual.
    pub seniority_pay: Decimal,
    /// Sum of the four accruals.
    pub total_benefits: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the four statutory benefit accruals for a monthly salary.
///
/// The seniority premium uses the vacation-day count of the schedule row.
///
/// # Examples
///
/// ```
/// use quotation_engine::calculation::calculate_statutory_benefits;
/// use quotation_engine::config::SeniorityBenefitRow;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let row = SeniorityBenefitRow {
///     years_of_service: 1,
///     vacation_days: 12,
///     christmas_bonus_days: 15,
///     vacation_premium_percent: Decimal::from(25),
/// };
///
/// let result = calculate_statutory_benefits(Decimal::from_str("11400.00").unwrap(), &row, 2);
/// assert_eq!(result.total_benefits, Decimal::from_str("1311.79").unwrap());
/// ```
pub fn calculate_statutory_benefits(
    monthly_salary: Decimal,
    row: &SeniorityBenefitRow,
    step_number: u32,
) -> StatutoryBenefitsResult {
    let vacation_percent = days_as_year_percent(row.vacation_days);
    let vacations = round_money(percent_of(vacation_percent, monthly_salary));

    let vacation_premium_percent =
        round_percent(percent_of(vacation_percent, row.vacation_premium_percent));
    let vacation_premium = round_money(percent_of(vacation_premium_percent, monthly_salary));

    let christmas_percent = days_as_year_percent(row.christmas_bonus_days);
    let christmas_bonus = round_money(percent_of(christmas_percent, monthly_salary));

    let seniority_percent = days_as_year_percent(row.vacation_days);
    let seniority_pay = round_money(percent_of(seniority_percent, monthly_salary));

    let total_benefits = vacations + vacation_premium + christmas_bonus + seniority_pay;

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_benefits".to_string(),
        rule_name: "Statutory Benefits".to_string(),
        legal_ref: "LFT arts. 76, 80, 87, 162".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "years_of_service": row.years_of_service,
            "vacation_days": row.vacation_days,
            "christmas_bonus_days": row.christmas_bonus_days,
            "vacation_premium_percent": row.vacation_premium_percent.to_string()
        }),
        output: serde_json::json!({
            "vacation_percent": vacation_percent.to_string(),
            "vacations": vacations.to_string(),
            "vacation_premium_percent": vacation_premium_percent.to_string(),
            "vacation_premium": vacation_premium.to_string(),
            "christmas_percent": christmas_percent.to_string(),
            "christmas_bonus": christmas_bonus.to_string(),
            "seniority_percent": seniority_percent.to_string(),
            "seniority_pay": seniority_pay.to_string(),
            "total_benefits": total_benefits.to_string()
        }),
        reasoning: format!(
            "Vacations {}% = ${}, premium {}% = ${}, year-end bonus {}% = ${}, seniority {}% = ${}",
            vacation_percent,
            vacations,
            vacation_premium_percent,
            vacation_premium,
            christmas_percent,
            christmas_bonus,
            seniority_percent,
            seniority_pay
        ),
    };

    StatutoryBenefitsResult {
        vacation_percent,
        vacations,
        vacation_premium_percent,
        vacation_premium,
        christmas_percent,
        christmas_bonus,
        seniority_percent,
        seniority_pay,
        total_benefits,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn first_year_row() -> SeniorityBenefitRow {
        SeniorityBenefitRow {
            years_of_service: 1,
            vacation_days: 12,
            christmas_bonus_days: 15,
            vacation_premium_percent: dec("25"),
        }
    }

    #[test]
    fn test_first_year_worked_example() {
        let result = calculate_statutory_benefits(dec("11400.00"), &first_year_row(), 1);

        assert_eq!(result.vacation_percent, dec("3.2877"));
        assert_eq!(result.vacations, dec("374.80"));
        assert_eq!(result.vacation_premium_percent, dec("0.8219"));
        assert_eq!(result.vacation_premium, dec("93.70"));
        assert_eq!(result.christmas_percent, dec("4.1096"));
        assert_eq!(result.christmas_bonus, dec("468.49"));
        assert_eq!(result.seniority_pay, dec("374.80"));
        assert_eq!(result.total_benefits, dec("1311.79"));
    }

    #[test]
    fn test_seniority_tracks_vacation_days() {
        let row = SeniorityBenefitRow {
            years_of_service: 5,
            vacation_days: 20,
            christmas_bonus_days: 15,
            vacation_premium_percent: dec("25"),
        };

        let result = calculate_statutory_benefits(dec("15000.00"), &row, 1);

        assert_eq!(result.seniority_percent, result.vacation_percent);
        assert_eq!(result.seniority_pay, result.vacations);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let result = calculate_statutory_benefits(dec("13777.77"), &first_year_row(), 1);

        assert_eq!(
            result.total_benefits,
            result.vacations
                + result.vacation_premium
                + result.christmas_bonus
                + result.seniority_pay
        );
    }

    #[test]
    fn test_zero_salary_accrues_nothing() {
        let result = calculate_statutory_benefits(Decimal::ZERO, &first_year_row(), 1);
        assert_eq!(result.total_benefits, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_row() {
        let result = calculate_statutory_benefits(dec("11400.00"), &first_year_row(), 2);

        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.input["vacation_days"], 12);
        assert_eq!(result.audit_step.output["total_benefits"], "1311.79");
    }
}
