//! Quotation models.
//!
//! This module contains the [`Quotation`] record produced by a successful
//! calculation and its supporting structures: the cost breakdown, the
//! resolved uniform lines, and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, QuotationRequest};

/// Components behind the headline figures of a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationBreakdown {
    /// Pay for rest days worked.
    pub rest_days_pay: Decimal,
    /// Annualized pay for worked calendar holidays.
    pub holiday_pay: Decimal,
    /// Pay for the 31st day of long months.
    pub day_31_pay: Decimal,
    /// Vacation pay accrual.
    pub vacations: Decimal,
    /// Vacation premium accrual.
    pub vacation_premium: Decimal,
    /// Year-end bonus accrual.
    pub christmas_bonus: Decimal,
    /// Seniority premium accrual.
    pub seniority_pay: Decimal,
    /// Administrative overhead.
    pub admin_expenses: Decimal,
}

/// A uniform line priced at its historical ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniformDetail {
    /// The requested stock unit.
    pub uniform_stock_id: u32,
    /// Garment type name.
    #[serde(rename = "type")]
    pub uniform_type: String,
    /// Size name.
    pub size: String,
    /// Color name.
    pub color: String,
    /// Units per guard.
    pub quantity: u32,
    /// Highest unit price invoiced for this variant in the business line.
    pub max_unit_price: Decimal,
    /// `max_unit_price × quantity`.
    pub subtotal: Decimal,
    /// `subtotal / 12`, rounded for display.
    pub monthly_amortized: Decimal,
}

/// Every figure a calculation derives, before a folio is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationDraft {
    /// The validated request the figures were derived from.
    #[serde(flatten)]
    pub request: QuotationRequest,
    /// Gross monthly salary per guard.
    pub monthly_salary: Decimal,
    /// Sum of the four statutory benefit accruals.
    pub total_benefits: Decimal,
    /// Monthly employer social-security charge.
    pub total_social_charge: Decimal,
    /// Income tax plus regional surcharge.
    pub state_tax: Decimal,
    /// Fully-loaded monthly cost per guard.
    pub total_cost_per_guard: Decimal,
    /// Monthly amortized uniform cost per guard.
    pub uniform_cost: Decimal,
    /// `uniform_cost + total_cost_per_guard`.
    pub sale_cost_without_financing: Decimal,
    /// Imputed cost of the collection window.
    pub financing: Decimal,
    /// `sale_cost_without_financing + financing`.
    pub total_sale_cost: Decimal,
    /// Profit margin.
    pub utility: Decimal,
    /// Monthly sale price per guard.
    pub sale_price: Decimal,
    /// Monthly sale price for the whole headcount.
    pub total_monthly_price: Decimal,
    /// Components behind the headline figures.
    pub breakdown: QuotationBreakdown,
    /// Uniform lines priced at their ceiling.
    pub uniforms_details: Vec<UniformDetail>,
    /// Audit trace of the calculation.
    pub audit_trace: AuditTrace,
}

/// A recorded quotation.
///
/// Created once per successful calculation and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    /// Unique human-readable identifier.
    pub folio: String,
    /// When the quotation was recorded.
    pub created_at: DateTime<Utc>,
    /// The version of the engine that priced the quotation.
    pub engine_version: String,
    /// The calculated figures.
    #[serde(flatten)]
    pub draft: QuotationDraft,
}

impl Quotation {
    /// Assigns a folio to a draft.
    pub fn new(folio: impl Into<String>, created_at: DateTime<Utc>, draft: QuotationDraft) -> Self {
        Self {
            folio: folio.into(),
            created_at,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            draft,
        }
    }
}
