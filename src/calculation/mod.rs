//! Calculation logic for the Quotation Engine.
//!
//! This module contains the calculators that price a guard-staffing
//! quotation: request validation, gross monthly salary, statutory benefit
//! accruals, employer social-security contributions, income tax with the
//! regional surcharge, uniform cost at its historical ceiling, and the final
//! cost and sale price aggregation. [`price_quotation`] runs them in order.

mod income_tax;
mod monthly_salary;
mod pipeline;
mod pricing;
pub mod rounding;
mod social_security;
mod statutory_benefits;
mod uniform_cost;
mod validation;

pub use income_tax::{
    IncomeTaxResult, REGION_SURCHARGE_NOT_FOUND, TAX_BRACKET_NOT_FOUND, calculate_income_tax,
};
pub use monthly_salary::{
    HOLIDAY_PAY_MULTIPLIER, MonthlySalaryInput, MonthlySalaryResult, calculate_monthly_salary,
};
pub use pipeline::price_quotation;
pub use pricing::{PricingInput, PricingResult, calculate_sale_price};
pub use social_security::{
    ContributionLine, INTEGRATION_PREMIUM_DAYS, SocialSecurityInput,
    SocialSecurityResult, calculate_social_security,
};
pub use statutory_benefits::{StatutoryBenefitsResult, calculate_statutory_benefits};
pub use uniform_cost::{UniformCostResult, max_unit_price, resolve_uniform_costs};
pub use validation::{MAX_NET_SALARY, validate_request};
