//! Configuration types for quotation pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Financing terms applied to the sale cost.
#[derive(Debug, Clone, Deserialize)]
pub struct FinancingSettings {
    /// Annualized reference rate as a fraction (e.g., `0.1125` for 11.25%).
    pub annual_reference_rate: Decimal,
    /// Collection window priced by the financing cost, in days.
    #[serde(default = "default_financing_days")]
    pub window_days: u32,
}

fn default_financing_days() -> u32 {
    60
}

/// Pricing policy from pricing.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingSettings {
    /// Administrative overhead as a percentage of the monthly salary.
    pub admin_expense_percent: Decimal,
    /// Profit margin as a percentage of the sale cost before financing.
    pub utility_percent: Decimal,
    /// Financing terms.
    pub financing: FinancingSettings,
    /// Years of service used to pick the seniority benefit row.
    #[serde(default = "default_seniority_years")]
    pub seniority_years: u32,
    /// Prefix for generated folios.
    #[serde(default = "default_folio_prefix")]
    pub folio_prefix: String,
}

fn default_seniority_years() -> u32 {
    1
}

fn default_folio_prefix() -> String {
    "COT".to_string()
}

/// Statutory benefit entitlements for a given number of years of service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityBenefitRow {
    /// Completed years of service this row applies to.
    pub years_of_service: u32,
    /// Paid vacation days per year.
    pub vacation_days: u32,
    /// Year-end bonus days.
    pub christmas_bonus_days: u32,
    /// Vacation premium as a percentage of vacation pay.
    pub vacation_premium_percent: Decimal,
}

/// A scalar value scoped to a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YearValue {
    /// The year the value is published for.
    pub year: i32,
    /// The value itself.
    pub value: Decimal,
}

/// A public holiday in the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Labor-law tables from labor.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct LaborConfig {
    /// Benefit schedule by years of service.
    pub seniority_benefits: Vec<SeniorityBenefitRow>,
    /// Holiday calendar.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Day-31 adjustment percentage by year.
    #[serde(default)]
    pub day_31_adjustments: Vec<YearValue>,
}

/// The ten employer social-security contribution concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionConcept {
    /// Fixed fee charged on the wage unit value.
    FixedFee,
    /// Surcharge on the part of the integrated wage above three wage units.
    ExcessOverThreeUnits,
    /// Sickness and maternity cash benefits.
    CashBenefits,
    /// Medical expenses for pensioners.
    PensionerMedicalExpenses,
    /// Disability and life insurance.
    DisabilityAndLife,
    /// Retirement savings.
    Retirement,
    /// Old age and unemployment at advanced age.
    OldAgeAndUnemployment,
    /// Daycare and social benefits.
    Daycare,
    /// Workers' housing fund.
    HousingFund,
    /// Occupational risk insurance.
    OccupationalRisk,
}

impl ContributionConcept {
    /// Every concept, in remittance order.
    pub const ALL: [ContributionConcept; 10] = [
        ContributionConcept::FixedFee,
        ContributionConcept::ExcessOverThreeUnits,
        ContributionConcept::CashBenefits,
        ContributionConcept::PensionerMedicalExpenses,
        ContributionConcept::DisabilityAndLife,
        ContributionConcept::Retirement,
        ContributionConcept::OldAgeAndUnemployment,
        ContributionConcept::Daycare,
        ContributionConcept::HousingFund,
        ContributionConcept::OccupationalRisk,
    ];

    /// Returns the snake_case identifier used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionConcept::FixedFee => "fixed_fee",
            ContributionConcept::ExcessOverThreeUnits => "excess_over_three_units",
            ContributionConcept::CashBenefits => "cash_benefits",
            ContributionConcept::PensionerMedicalExpenses => "pensioner_medical_expenses",
            ContributionConcept::DisabilityAndLife => "disability_and_life",
            ContributionConcept::Retirement => "retirement",
            ContributionConcept::OldAgeAndUnemployment => "old_age_and_unemployment",
            ContributionConcept::Daycare => "daycare",
            ContributionConcept::HousingFund => "housing_fund",
            ContributionConcept::OccupationalRisk => "occupational_risk",
        }
    }
}

/// Employer contribution percentages keyed by concept.
///
/// Can only be built through [`ContributionSchedule::new`], which rejects a
/// schedule that does not list all ten concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionSchedule {
    rates: HashMap<ContributionConcept, Decimal>,
}

impl ContributionSchedule {
    /// Builds a schedule, validating that every concept has a non-negative rate.
    pub fn new(rates: HashMap<ContributionConcept, Decimal>) -> EngineResult<Self> {
        let missing: Vec<&str> = ContributionConcept::ALL
            .iter()
            .filter(|c| !rates.contains_key(c))
            .map(|c| c.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::InvalidReferenceData {
                table: "contribution_rates".to_string(),
                message: format!("missing concepts: {}", missing.join(", ")),
            });
        }
        if let Some((concept, rate)) = rates.iter().find(|(_, r)| r.is_sign_negative()) {
            return Err(EngineError::InvalidReferenceData {
                table: "contribution_rates".to_string(),
                message: format!("negative rate {} for {}", rate, concept.as_str()),
            });
        }
        Ok(Self { rates })
    }

    /// Returns the employer percentage for a concept.
    pub fn rate(&self, concept: ContributionConcept) -> Decimal {
        self.rates.get(&concept).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Social-security tables from social_security.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialSecurityConfig {
    /// Wage unit (UMA) value by year.
    pub wage_unit_values: Vec<YearValue>,
    /// Base daily salary by year.
    pub base_daily_salaries: Vec<YearValue>,
    /// Occupational-risk premium percentage by year.
    pub risk_premiums: Vec<YearValue>,
    /// Employer contribution percentages keyed by concept.
    pub contribution_rates: HashMap<ContributionConcept, Decimal>,
}

/// A progressive income-tax bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of monthly income.
    pub lower_limit: Decimal,
    /// Upper bound of monthly income as published. Amounts below the next
    /// bracket's lower limit still fall in this bracket.
    pub upper_limit: Decimal,
    /// Fixed tax owed at the lower bound.
    pub fixed_fee: Decimal,
    /// Marginal percentage applied to income above the lower bound.
    pub excess_percent: Decimal,
}

/// Fixed surcharge for a region and business line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionSurcharge {
    /// The federal entity identifier.
    pub region_id: String,
    /// The business line identifier.
    pub business_line_id: u32,
    /// Fixed amount added verbatim to the income tax.
    pub amount: Decimal,
}

/// Tax tables from tax.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Monthly income-tax brackets.
    pub brackets: Vec<TaxBracket>,
    /// Surcharges by region and business line.
    #[serde(default)]
    pub region_surcharges: Vec<RegionSurcharge>,
}

/// A named catalog entry with a numeric identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// The identifier.
    pub id: u32,
    /// The display name.
    pub name: String,
}

/// A federal entity (region).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    /// The identifier (e.g., "CDMX").
    pub id: String,
    /// The display name.
    pub name: String,
}

/// Catalog snapshot from catalog.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Business lines.
    pub business_lines: Vec<CatalogEntry>,
    /// Shift types.
    pub shift_types: Vec<CatalogEntry>,
    /// Federal entities.
    pub regions: Vec<Region>,
    /// Uniform garment types.
    pub uniform_types: Vec<CatalogEntry>,
    /// Garment sizes.
    pub sizes: Vec<CatalogEntry>,
    /// Garment colors.
    pub colors: Vec<CatalogEntry>,
}

/// A supplier invoice uniforms were billed on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Invoice {
    /// The identifier.
    pub id: u32,
    /// The business line the invoice was charged to.
    pub business_line_id: u32,
    /// Supplier invoice number.
    #[serde(default)]
    pub number: String,
}

/// One physical uniform unit received on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UniformStockUnit {
    /// The identifier.
    pub id: u32,
    /// Garment type identifier.
    pub uniform_type_id: u32,
    /// Size identifier.
    pub size_id: u32,
    /// Color identifier.
    pub color_id: u32,
    /// The invoiced unit price.
    pub unit_price: Decimal,
    /// The invoice the unit was billed on.
    pub invoice_id: u32,
}

impl UniformStockUnit {
    /// Returns true if both units share type, size and color.
    pub fn same_variant(&self, other: &UniformStockUnit) -> bool {
        self.uniform_type_id == other.uniform_type_id
            && self.size_id == other.size_id
            && self.color_id == other.color_id
    }
}

/// Inventory snapshot from inventory.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Supplier invoices.
    pub invoices: Vec<Invoice>,
    /// Uniform stock units.
    pub stock: Vec<UniformStockUnit>,
}

impl InventoryConfig {
    /// Finds a stock unit by identifier.
    pub fn stock_unit(&self, id: u32) -> Option<&UniformStockUnit> {
        self.stock.iter().find(|u| u.id == id)
    }

    /// Finds an invoice by identifier.
    pub fn invoice(&self, id: u32) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    /// Returns the business line a stock unit was billed to.
    pub fn business_line_of(&self, unit: &UniformStockUnit) -> Option<u32> {
        self.invoice(unit.invoice_id).map(|i| i.business_line_id)
    }
}

/// The complete reference configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ReferenceConfig {
    pricing: PricingSettings,
    labor: LaborConfig,
    social_security: SocialSecurityConfig,
    contribution_schedule: ContributionSchedule,
    tax: TaxConfig,
    catalog: CatalogConfig,
    inventory: InventoryConfig,
}

impl ReferenceConfig {
    /// Creates a new ReferenceConfig from its component parts.
    ///
    /// Year-scoped tables are sorted oldest first and brackets by lower
    /// limit. Fails if the contribution schedule is incomplete, brackets
    /// overlap, or the inventory references unknown invoices or carries
    /// non-positive prices.
    pub fn new(
        pricing: PricingSettings,
        mut labor: LaborConfig,
        mut social_security: SocialSecurityConfig,
        mut tax: TaxConfig,
        catalog: CatalogConfig,
        inventory: InventoryConfig,
    ) -> EngineResult<Self> {
        let contribution_schedule =
            ContributionSchedule::new(social_security.contribution_rates.clone())?;

        for table in [
            &mut social_security.wage_unit_values,
            &mut social_security.base_daily_salaries,
            &mut social_security.risk_premiums,
            &mut labor.day_31_adjustments,
        ] {
            table.sort_by_key(|row| row.year);
        }
        labor.holidays.sort_by_key(|h| h.date);

        tax.brackets.sort_by(|a, b| a.lower_limit.cmp(&b.lower_limit));
        for pair in tax.brackets.windows(2) {
            if pair[1].lower_limit <= pair[0].upper_limit {
                return Err(EngineError::InvalidReferenceData {
                    table: "tax_brackets".to_string(),
                    message: format!(
                        "bracket starting at {} overlaps bracket ending at {}",
                        pair[1].lower_limit, pair[0].upper_limit
                    ),
                });
            }
        }

        for unit in &inventory.stock {
            if unit.unit_price <= Decimal::ZERO {
                return Err(EngineError::InvalidReferenceData {
                    table: "inventory".to_string(),
                    message: format!("stock unit {} has non-positive price", unit.id),
                });
            }
            if inventory.invoice(unit.invoice_id).is_none() {
                return Err(EngineError::InvalidReferenceData {
                    table: "inventory".to_string(),
                    message: format!(
                        "stock unit {} references unknown invoice {}",
                        unit.id, unit.invoice_id
                    ),
                });
            }
        }

        Ok(Self {
            pricing,
            labor,
            social_security,
            contribution_schedule,
            tax,
            catalog,
            inventory,
        })
    }

    /// Returns the pricing policy.
    pub fn pricing(&self) -> &PricingSettings {
        &self.pricing
    }

    /// Returns the labor-law tables.
    pub fn labor(&self) -> &LaborConfig {
        &self.labor
    }

    /// Returns the social-security tables.
    pub fn social_security(&self) -> &SocialSecurityConfig {
        &self.social_security
    }

    /// Returns the validated contribution schedule.
    pub fn contribution_schedule(&self) -> &ContributionSchedule {
        &self.contribution_schedule
    }

    /// Returns the tax tables.
    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }

    /// Returns the catalog snapshot.
    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Returns the inventory snapshot.
    pub fn inventory(&self) -> &InventoryConfig {
        &self.inventory
    }

    /// Returns the holidays of the most recent calendar year on file.
    pub fn latest_holidays(&self) -> Vec<&Holiday> {
        let Some(latest_year) = self.labor.holidays.iter().map(|h| h.date.year()).max() else {
            return Vec::new();
        };
        self.labor
            .holidays
            .iter()
            .filter(|h| h.date.year() == latest_year)
            .collect()
    }
}
