//! Employer social-security (IMSS) contributions.
//!
//! Builds the integrated daily wage (SDI) from the base daily salary and
//! sums the employer contribution for each concept of the schedule into a
//! daily cost, which is then scaled to a month.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{ContributionConcept, ContributionSchedule};
use crate::models::AuditStep;

use super::rounding::{DAYS_PER_MONTH, DAYS_PER_YEAR, percent_of, round_money};

/// Vacation-premium days folded into the integration factor.
pub const INTEGRATION_PREMIUM_DAYS: u32 = 3;

/// Concepts charged as a percentage of the integrated daily wage.
const SDI_WEIGHTED_CONCEPTS: [ContributionConcept; 7] = [
    ContributionConcept::CashBenefits,
    ContributionConcept::PensionerMedicalExpenses,
    ContributionConcept::DisabilityAndLife,
    ContributionConcept::Retirement,
    ContributionConcept::OldAgeAndUnemployment,
    ContributionConcept::Daycare,
    ContributionConcept::HousingFund,
];

/// Inputs to the social-security calculation.
#[derive(Debug, Clone)]
pub struct SocialSecurityInput<'a> {
    /// Year-end bonus days from the seniority schedule.
    pub christmas_bonus_days: u32,
    /// Wage unit (UMA) value.
    pub wage_unit_value: Decimal,
    /// Base daily salary the SDI is built on.
    pub base_daily_salary: Decimal,
    /// Occupational-risk premium percentage.
    pub risk_premium_rate: Decimal,
    /// Employer contribution schedule.
    pub schedule: &'a ContributionSchedule,
}

/// One employer contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionLine {
    /// The contribution concept.
    pub concept: ContributionConcept,
    /// The percentage applied.
    pub rate: Decimal,
    /// The daily amount the percentage was applied to.
    pub base: Decimal,
    /// The daily contribution.
    pub amount: Decimal,
}

/// The result of the social-security calculation.
#[derive(Debug, Clone)]
pub struct SocialSecurityResult {
    /// `1 + 3/365 + christmas_bonus_days/365`.
    pub integration_factor: Decimal,
    /// Integrated daily wage.
    pub integrated_daily_wage: Decimal,
    /// One line per contribution concept, in remittance order.
    pub contributions: Vec<ContributionLine>,
    /// Sum of all daily contributions.
    pub total_daily_employer_cost: Decimal,
    /// `total_daily_employer_cost × 30`.
    pub monthly_social_charge: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly employer social-security charge.
///
/// The fixed fee is charged on the wage unit value. The excess-over-three-units
/// contribution is carried as a zero line whatever the SDI. Occupational risk
/// uses the risk-premium rate rather than the schedule row, and every other
/// concept is a percentage of the SDI. Each contribution rounds to cents.
pub fn calculate_social_security(
    input: &SocialSecurityInput<'_>,
    step_number: u32,
) -> SocialSecurityResult {
    let days_per_year = Decimal::from(DAYS_PER_YEAR);
    let integration_factor = Decimal::ONE
        + Decimal::from(INTEGRATION_PREMIUM_DAYS) / days_per_year
        + Decimal::from(input.christmas_bonus_days) / days_per_year;
    let sdi = round_money(integration_factor * input.base_daily_salary);

    let mut contributions = Vec::with_capacity(ContributionConcept::ALL.len());

    let fixed_fee_rate = input.schedule.rate(ContributionConcept::FixedFee);
    contributions.push(ContributionLine {
        concept: ContributionConcept::FixedFee,
        rate: fixed_fee_rate,
        base: input.wage_unit_value,
        amount: round_money(percent_of(input.wage_unit_value, fixed_fee_rate)),
    });

    contributions.push(ContributionLine {
        concept: ContributionConcept::ExcessOverThreeUnits,
        rate: input.schedule.rate(ContributionConcept::ExcessOverThreeUnits),
        base: Decimal::ZERO,
        amount: Decimal::ZERO,
    });

    for concept in SDI_WEIGHTED_CONCEPTS {
        let rate = input.schedule.rate(concept);
        contributions.push(ContributionLine {
            concept,
            rate,
            base: sdi,
            amount: round_money(percent_of(sdi, rate)),
        });
    }

    contributions.push(ContributionLine {
        concept: ContributionConcept::OccupationalRisk,
        rate: input.risk_premium_rate,
        base: sdi,
        amount: round_money(percent_of(sdi, input.risk_premium_rate)),
    });

    let total_daily_employer_cost: Decimal = contributions.iter().map(|c| c.amount).sum();
    let monthly_social_charge = total_daily_employer_cost * Decimal::from(DAYS_PER_MONTH);

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security".to_string(),
        rule_name: "Employer Social Security".to_string(),
        legal_ref: "LSS arts. 25, 71, 106, 107, 147, 168, 211; LINFONAVIT art. 29".to_string(),
        input: serde_json::json!({
            "christmas_bonus_days": input.christmas_bonus_days,
            "wage_unit_value": input.wage_unit_value.to_string(),
            "base_daily_salary": input.base_daily_salary.to_string(),
            "risk_premium_rate": input.risk_premium_rate.to_string()
        }),
        output: serde_json::json!({
            "integration_factor": integration_factor.round_dp(6).to_string(),
            "integrated_daily_wage": sdi.to_string(),
            "contributions": contributions
                .iter()
                .map(|c| serde_json::json!({
                    "concept": c.concept.as_str(),
                    "rate": c.rate.to_string(),
                    "base": c.base.to_string(),
                    "amount": c.amount.to_string()
                }))
                .collect::<Vec<_>>(),
            "total_daily_employer_cost": total_daily_employer_cost.to_string(),
            "monthly_social_charge": monthly_social_charge.to_string()
        }),
        reasoning: format!(
            "SDI ${} from factor {} × ${}; daily employer cost ${} × {} days = ${}",
            sdi,
            integration_factor.round_dp(6),
            input.base_daily_salary,
            total_daily_employer_cost,
            DAYS_PER_MONTH,
            monthly_social_charge
        ),
    };

    SocialSecurityResult {
        integration_factor,
        integrated_daily_wage: sdi,
        contributions,
        total_daily_employer_cost,
        monthly_social_charge,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn schedule() -> ContributionSchedule {
        let rates: HashMap<ContributionConcept, Decimal> = [
            (ContributionConcept::FixedFee, "20.40"),
            (ContributionConcept::ExcessOverThreeUnits, "1.10"),
            (ContributionConcept::CashBenefits, "0.70"),
            (ContributionConcept::PensionerMedicalExpenses, "1.05"),
            (ContributionConcept::DisabilityAndLife, "1.75"),
            (ContributionConcept::Retirement, "2.00"),
            (ContributionConcept::OldAgeAndUnemployment, "3.150"),
            (ContributionConcept::Daycare, "1.00"),
            (ContributionConcept::HousingFund, "5.00"),
            (ContributionConcept::OccupationalRisk, "0"),
        ]
        .into_iter()
        .map(|(c, r)| (c, dec(r)))
        .collect();
        ContributionSchedule::new(rates).unwrap()
    }

    fn amount(result: &SocialSecurityResult, concept: ContributionConcept) -> Decimal {
        result
            .contributions
            .iter()
            .find(|c| c.concept == concept)
            .map(|c| c.amount)
            .unwrap()
    }

    fn run(base_daily_salary: &str) -> SocialSecurityResult {
        let schedule = schedule();
        let input = SocialSecurityInput {
            christmas_bonus_days: 15,
            wage_unit_value: dec("113.14"),
            base_daily_salary: dec(base_daily_salary),
            risk_premium_rate: dec("2.59840"),
            schedule: &schedule,
        };
        calculate_social_security(&input, 1)
    }

    #[test]
    fn test_integrated_daily_wage() {
        let result = run("278.80");
        assert_eq!(result.integrated_daily_wage, dec("292.55"));
    }

    #[test]
    fn test_contributions_per_concept() {
        let result = run("278.80");

        assert_eq!(amount(&result, ContributionConcept::FixedFee), dec("23.08"));
        assert_eq!(
            amount(&result, ContributionConcept::ExcessOverThreeUnits),
            Decimal::ZERO
        );
        assert_eq!(amount(&result, ContributionConcept::CashBenefits), dec("2.05"));
        assert_eq!(
            amount(&result, ContributionConcept::PensionerMedicalExpenses),
            dec("3.07")
        );
        assert_eq!(amount(&result, ContributionConcept::DisabilityAndLife), dec("5.12"));
        assert_eq!(amount(&result, ContributionConcept::Retirement), dec("5.85"));
        assert_eq!(
            amount(&result, ContributionConcept::OldAgeAndUnemployment),
            dec("9.22")
        );
        assert_eq!(amount(&result, ContributionConcept::Daycare), dec("2.93"));
        assert_eq!(amount(&result, ContributionConcept::HousingFund), dec("14.63"));
        assert_eq!(amount(&result, ContributionConcept::OccupationalRisk), dec("7.60"));
    }

    #[test]
    fn test_monthly_charge_is_daily_cost_times_thirty() {
        let result = run("278.80");

        assert_eq!(result.total_daily_employer_cost, dec("73.55"));
        assert_eq!(result.monthly_social_charge, dec("2206.50"));
    }

    #[test]
    fn test_every_concept_has_a_line_in_order() {
        let result = run("278.80");

        let concepts: Vec<ContributionConcept> =
            result.contributions.iter().map(|c| c.concept).collect();
        assert_eq!(concepts, ContributionConcept::ALL.to_vec());
    }

    #[test]
    fn test_occupational_risk_uses_premium_rate_not_schedule_row() {
        let result = run("278.80");

        let line = result
            .contributions
            .iter()
            .find(|c| c.concept == ContributionConcept::OccupationalRisk)
            .unwrap();
        assert_eq!(line.rate, dec("2.59840"));
    }

    #[test]
    fn test_excess_line_stays_zero_above_three_wage_units() {
        // SDI = round(1.0493150685 × 400, 2) = 419.73, above 3 × 113.14
        let result = run("400.00");

        assert_eq!(result.integrated_daily_wage, dec("419.73"));
        let line = result
            .contributions
            .iter()
            .find(|c| c.concept == ContributionConcept::ExcessOverThreeUnits)
            .unwrap();
        assert_eq!(line.rate, dec("1.10"));
        assert_eq!(line.amount, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_lists_contributions() {
        let result = run("278.80");

        assert_eq!(result.audit_step.rule_id, "social_security");
        assert_eq!(
            result.audit_step.output["contributions"]
                .as_array()
                .unwrap()
                .len(),
            10
        );
        assert_eq!(result.audit_step.output["integrated_daily_wage"], "292.55");
    }
}
