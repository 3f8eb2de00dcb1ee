//! The quotation pricing pipeline.
//!
//! Runs the calculators in order (salary, benefits, social security, tax,
//! uniforms, aggregation), deciding per lookup whether a missing reference
//! row is fatal or degrades to zero.

use std::time::Instant;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AuditTrace, QuotationBreakdown, QuotationDraft, QuotationPayload};

use super::income_tax::calculate_income_tax;
use super::monthly_salary::{MonthlySalaryInput, calculate_monthly_salary};
use super::pricing::{PricingInput, calculate_sale_price};
use super::social_security::{SocialSecurityInput, calculate_social_security};
use super::statutory_benefits::calculate_statutory_benefits;
use super::uniform_cost::resolve_uniform_costs;
use super::validation::validate_request;

/// Prices a quotation request.
///
/// Validates the payload, then derives every figure of the quotation. The
/// result has no folio yet; recording it is a separate step.
///
/// # Errors
///
/// - [`EngineError::Validation`](crate::error::EngineError::Validation) if
///   any field is invalid.
/// - [`EngineError::MissingReferenceData`](crate::error::EngineError::MissingReferenceData)
///   if the seniority row, wage unit, base daily salary or risk premium is
///   missing, or if the 31st is paid and no adjustment is on file.
pub fn price_quotation(
    payload: &QuotationPayload,
    loader: &ConfigLoader,
) -> EngineResult<QuotationDraft> {
    let start_time = Instant::now();
    let request = validate_request(payload, loader)?;
    let pricing = loader.pricing();

    let seniority = loader.seniority_benefit(pricing.seniority_years)?;
    let wage_unit = loader.wage_unit_value()?;
    let base_salary = loader.base_daily_salary()?;
    let risk_premium = loader.risk_premium_rate()?;

    let mut trace = AuditTrace::default();

    let salary = calculate_monthly_salary(
        &MonthlySalaryInput {
            net_salary: request.net_salary,
            total_rest_days: request.total_rest_days,
            has_holidays: request.has_holidays,
            has_day_31: request.has_day_31,
            holiday_count: loader.holiday_count(),
            day_31_adjustment: loader.day_31_adjustment().ok().map(|row| row.value),
        },
        trace.next_step_number(),
    )?;
    trace.steps.push(salary.audit_step.clone());

    let benefits =
        calculate_statutory_benefits(salary.monthly_salary, seniority, trace.next_step_number());
    trace.steps.push(benefits.audit_step.clone());

    let social = calculate_social_security(
        &SocialSecurityInput {
            christmas_bonus_days: seniority.christmas_bonus_days,
            wage_unit_value: wage_unit.value,
            base_daily_salary: base_salary.value,
            risk_premium_rate: risk_premium.value,
            schedule: loader.contribution_schedule(),
        },
        trace.next_step_number(),
    );
    trace.steps.push(social.audit_step.clone());

    let tax = calculate_income_tax(
        salary.monthly_salary,
        loader.tax_bracket(salary.monthly_salary),
        loader.region_surcharge(&request.federal_entity_id, request.business_line_id),
        trace.next_step_number(),
    );
    trace.steps.push(tax.audit_step.clone());
    trace.warnings.extend(tax.warnings);

    let uniforms = resolve_uniform_costs(
        &request.uniforms,
        request.business_line_id,
        loader,
        trace.next_step_number(),
    )?;
    trace.steps.push(uniforms.audit_step.clone());

    let price = calculate_sale_price(
        &PricingInput {
            monthly_salary: salary.monthly_salary,
            total_benefits: benefits.total_benefits,
            monthly_social_charge: social.monthly_social_charge,
            state_tax: tax.state_tax,
            uniform_cost: uniforms.uniform_cost,
            total_elements: request.total_elements,
        },
        pricing,
        trace.next_step_number(),
    );
    trace.steps.push(price.audit_step.clone());

    trace.duration_us = start_time.elapsed().as_micros() as u64;

    tracing::debug!(
        business_line_id = request.business_line_id,
        region = %request.federal_entity_id,
        sale_price = %price.sale_price,
        warnings = trace.warnings.len(),
        duration_us = trace.duration_us,
        "Priced quotation"
    );

    Ok(QuotationDraft {
        request,
        monthly_salary: salary.monthly_salary,
        total_benefits: benefits.total_benefits,
        total_social_charge: social.monthly_social_charge,
        state_tax: tax.state_tax,
        total_cost_per_guard: price.total_cost_per_guard,
        uniform_cost: uniforms.uniform_cost,
        sale_cost_without_financing: price.sale_cost_without_financing,
        financing: price.financing,
        total_sale_cost: price.total_sale_cost,
        utility: price.utility,
        sale_price: price.sale_price,
        total_monthly_price: price.total_monthly_price,
        breakdown: QuotationBreakdown {
            rest_days_pay: salary.rest_days_pay,
            holiday_pay: salary.holiday_pay,
            day_31_pay: salary.day_31_pay,
            vacations: benefits.vacations,
            vacation_premium: benefits.vacation_premium,
            christmas_bonus: benefits.christmas_bonus,
            seniority_pay: benefits.seniority_pay,
            admin_expenses: price.admin_expenses,
        },
        uniforms_details: uniforms.details,
        audit_trace: trace,
    })
}
