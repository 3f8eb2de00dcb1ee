//! Uniform cost resolution.
//!
//! Each requested garment is priced at the highest unit price ever invoiced
//! for the same type, size and color within the quoted business line, then
//! amortized over twelve months.

use rust_decimal::Decimal;

use crate::config::{ConfigLoader, UniformStockUnit};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, UniformDetail, UniformRequestLine};

use super::rounding::{MONTHS_PER_YEAR, round_money};

/// The result of resolving uniform costs.
#[derive(Debug, Clone)]
pub struct UniformCostResult {
    /// Priced lines, in request order.
    pub details: Vec<UniformDetail>,
    /// Sum of the monthly amortized amounts, rounded to cents.
    pub uniform_cost: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Highest unit price among units of the same variant billed to the business line.
pub fn max_unit_price(
    loader: &ConfigLoader,
    unit: &UniformStockUnit,
    business_line_id: u32,
) -> Option<Decimal> {
    let inventory = loader.inventory();
    inventory
        .stock
        .iter()
        .filter(|candidate| candidate.same_variant(unit))
        .filter(|candidate| inventory.business_line_of(candidate) == Some(business_line_id))
        .map(|candidate| candidate.unit_price)
        .max()
}

/// Prices every requested uniform line for a business line.
///
/// The ceiling is always taken over invoices of the requested business
/// line, even when the referenced unit itself was billed to another line.
/// A variant never billed to the line has no price there and is rejected
/// as a validation error on that uniform line.
pub fn resolve_uniform_costs(
    lines: &[UniformRequestLine],
    business_line_id: u32,
    loader: &ConfigLoader,
    step_number: u32,
) -> EngineResult<UniformCostResult> {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let mut details = Vec::with_capacity(lines.len());
    let mut amortized_total = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        let unit = loader
            .inventory()
            .stock_unit(line.uniform_stock_id)
            .ok_or_else(|| {
                EngineError::validation(
                    format!("uniforms[{}].uniform_stock_id", index),
                    format!("uniform stock {} does not exist", line.uniform_stock_id),
                )
            })?;

        let max_price = max_unit_price(loader, unit, business_line_id).ok_or_else(|| {
            EngineError::validation(
                format!("uniforms[{}].uniform_stock_id", index),
                not_invoiced_message(unit.id, business_line_id),
            )
        })?;

        let subtotal = max_price * Decimal::from(line.quantity);
        let monthly_amortized = subtotal / months;
        amortized_total += monthly_amortized;

        details.push(UniformDetail {
            uniform_stock_id: unit.id,
            uniform_type: loader.uniform_type_name(unit.uniform_type_id),
            size: loader.size_name(unit.size_id),
            color: loader.color_name(unit.color_id),
            quantity: line.quantity,
            max_unit_price: max_price,
            subtotal,
            monthly_amortized: round_money(monthly_amortized),
        });
    }

    let uniform_cost = round_money(amortized_total);

    let audit_step = AuditStep {
        step_number,
        rule_id: "uniform_cost".to_string(),
        rule_name: "Uniform Cost".to_string(),
        legal_ref: "Pricing policy: historical price ceiling".to_string(),
        input: serde_json::json!({
            "business_line_id": business_line_id,
            "lines": lines
                .iter()
                .map(|l| serde_json::json!({
                    "uniform_stock_id": l.uniform_stock_id,
                    "quantity": l.quantity
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "lines": details
                .iter()
                .map(|d| serde_json::json!({
                    "uniform_stock_id": d.uniform_stock_id,
                    "max_unit_price": d.max_unit_price.to_string(),
                    "subtotal": d.subtotal.to_string()
                }))
                .collect::<Vec<_>>(),
            "uniform_cost": uniform_cost.to_string()
        }),
        reasoning: format!(
            "{} line(s) priced at their ceiling and amortized over {} months = ${}",
            details.len(),
            MONTHS_PER_YEAR,
            uniform_cost
        ),
    };

    Ok(UniformCostResult {
        details,
        uniform_cost,
        audit_step,
    })
}

pub(crate) fn not_invoiced_message(uniform_stock_id: u32, business_line_id: u32) -> String {
    format!(
        "uniform stock {} was never invoiced for business line {}",
        uniform_stock_id, business_line_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::load("./config/guard_staffing").unwrap()
    }

    fn line(id: u32, quantity: u32) -> UniformRequestLine {
        UniformRequestLine {
            uniform_stock_id: id,
            quantity,
        }
    }

    #[test]
    fn test_uses_ceiling_price_not_requested_unit_price() {
        let loader = loader();
        // Unit 1 was invoiced at 350.00; the same variant reached 385.50.
        let result = resolve_uniform_costs(&[line(1, 2)], 1, &loader, 1).unwrap();

        let detail = &result.details[0];
        assert_eq!(detail.max_unit_price, dec("385.50"));
        assert_eq!(detail.subtotal, dec("771.00"));
        assert_eq!(detail.monthly_amortized, dec("64.25"));
        assert_eq!(detail.uniform_type, "Shirt");
        assert_eq!(detail.size, "M");
        assert_eq!(detail.color, "Navy");
    }

    #[test]
    fn test_ignores_invoices_of_other_business_lines() {
        let loader = loader();
        // Unit 3 was billed to line 2 at 420.00; quoting line 1 must not see it.
        let result = resolve_uniform_costs(&[line(3, 1)], 1, &loader, 1).unwrap();
        assert_eq!(result.details[0].max_unit_price, dec("385.50"));

        let result = resolve_uniform_costs(&[line(1, 1)], 2, &loader, 1).unwrap();
        assert_eq!(result.details[0].max_unit_price, dec("420.00"));
    }

    #[test]
    fn test_uniform_cost_sums_amortized_lines() {
        let loader = loader();
        let result =
            resolve_uniform_costs(&[line(1, 2), line(4, 2), line(6, 1)], 1, &loader, 1).unwrap();

        // 771.00/12 + 960.00/12 + 890.00/12 = 218.4166…
        assert_eq!(result.uniform_cost, dec("218.42"));
    }

    #[test]
    fn test_variant_never_invoiced_for_line_is_rejected() {
        let loader = loader();
        // Unit 8 (trousers M navy) only exists on a line 2 invoice.
        assert!(max_unit_price(&loader, loader.inventory().stock_unit(8).unwrap(), 1).is_none());

        match resolve_uniform_costs(&[line(1, 1), line(8, 1)], 1, &loader, 1) {
            Err(EngineError::Validation { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "uniforms[1].uniform_stock_id");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        let result = resolve_uniform_costs(&[line(8, 1)], 2, &loader, 1).unwrap();
        assert_eq!(result.details[0].max_unit_price, dec("510.00"));
    }

    #[test]
    fn test_unknown_stock_unit_is_a_validation_error() {
        let loader = loader();
        let result = resolve_uniform_costs(&[line(999, 1)], 1, &loader, 1);

        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_quantity_increase_raises_subtotal() {
        let loader = loader();
        let one = resolve_uniform_costs(&[line(6, 1)], 1, &loader, 1).unwrap();
        let two = resolve_uniform_costs(&[line(6, 2)], 1, &loader, 1).unwrap();

        assert!(two.details[0].subtotal > one.details[0].subtotal);
        assert!(two.uniform_cost >= one.uniform_cost);
    }
}
