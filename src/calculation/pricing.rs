//! Cost and sale price aggregation.
//!
//! Combines the per-guard cost components with the uniform cost, then adds
//! the financing cost of the collection window and the profit margin.

use rust_decimal::Decimal;

use crate::config::PricingSettings;
use crate::models::AuditStep;

use super::rounding::{DAYS_PER_YEAR, percent_of, round_money};

/// Per-guard figures the sale price is built from.
#[derive(Debug, Clone)]
pub struct PricingInput {
    /// Gross monthly salary.
    pub monthly_salary: Decimal,
    /// Statutory benefit accruals.
    pub total_benefits: Decimal,
    /// Monthly employer social-security charge.
    pub monthly_social_charge: Decimal,
    /// Income tax plus regional surcharge.
    pub state_tax: Decimal,
    /// Monthly amortized uniform cost.
    pub uniform_cost: Decimal,
    /// Number of guards quoted.
    pub total_elements: u32,
}

/// The result of price aggregation.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Administrative overhead on the monthly salary.
    pub admin_expenses: Decimal,
    /// Fully-loaded monthly cost per guard.
    pub total_cost_per_guard: Decimal,
    /// `uniform_cost + total_cost_per_guard`.
    pub sale_cost_without_financing: Decimal,
    /// Financing cost of the collection window.
    pub financing: Decimal,
    /// `sale_cost_without_financing + financing`.
    pub total_sale_cost: Decimal,
    /// Profit margin on the cost before financing.
    pub utility: Decimal,
    /// `total_sale_cost + utility`.
    pub sale_price: Decimal,
    /// `sale_price × total_elements`.
    pub total_monthly_price: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Aggregates cost components into a sale price.
///
/// - `admin_expenses = monthly_salary × admin%`
/// - `total_cost_per_guard = salary + benefits + social charge + state tax + admin`
/// - `financing = sale_cost × reference_rate / 365 × window_days`
/// - `utility = sale_cost × utility%`
/// - `sale_price = sale_cost + financing + utility`
pub fn calculate_sale_price(
    input: &PricingInput,
    settings: &PricingSettings,
    step_number: u32,
) -> PricingResult {
    let admin_expenses = round_money(percent_of(
        input.monthly_salary,
        settings.admin_expense_percent,
    ));

    let total_cost_per_guard = input.monthly_salary
        + input.total_benefits
        + input.monthly_social_charge
        + input.state_tax
        + admin_expenses;

    let sale_cost_without_financing = input.uniform_cost + total_cost_per_guard;

    let financing = round_money(
        sale_cost_without_financing * settings.financing.annual_reference_rate
            / Decimal::from(DAYS_PER_YEAR)
            * Decimal::from(settings.financing.window_days),
    );

    let total_sale_cost = sale_cost_without_financing + financing;
    let utility = round_money(percent_of(
        sale_cost_without_financing,
        settings.utility_percent,
    ));
    let sale_price = total_sale_cost + utility;
    let total_monthly_price = sale_price * Decimal::from(input.total_elements);

    let audit_step = AuditStep {
        step_number,
        rule_id: "sale_price".to_string(),
        rule_name: "Cost and Sale Price".to_string(),
        legal_ref: "Pricing policy".to_string(),
        input: serde_json::json!({
            "monthly_salary": input.monthly_salary.to_string(),
            "total_benefits": input.total_benefits.to_string(),
            "monthly_social_charge": input.monthly_social_charge.to_string(),
            "state_tax": input.state_tax.to_string(),
            "uniform_cost": input.uniform_cost.to_string(),
            "total_elements": input.total_elements,
            "admin_expense_percent": settings.admin_expense_percent.to_string(),
            "utility_percent": settings.utility_percent.to_string(),
            "annual_reference_rate": settings.financing.annual_reference_rate.to_string(),
            "financing_window_days": settings.financing.window_days
        }),
        output: serde_json::json!({
            "admin_expenses": admin_expenses.to_string(),
            "total_cost_per_guard": total_cost_per_guard.to_string(),
            "sale_cost_without_financing": sale_cost_without_financing.to_string(),
            "financing": financing.to_string(),
            "total_sale_cost": total_sale_cost.to_string(),
            "utility": utility.to_string(),
            "sale_price": sale_price.to_string(),
            "total_monthly_price": total_monthly_price.to_string()
        }),
        reasoning: format!(
            "Cost ${} + financing ${} + utility ${} = ${} per guard; × {} = ${}",
            sale_cost_without_financing,
            financing,
            utility,
            sale_price,
            input.total_elements,
            total_monthly_price
        ),
    };

    PricingResult {
        admin_expenses,
        total_cost_per_guard,
        sale_cost_without_financing,
        financing,
        total_sale_cost,
        utility,
        sale_price,
        total_monthly_price,
        audit_step,
    }
}
