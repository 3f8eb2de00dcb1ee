//! Request validation.
//!
//! Checks every field of a [`QuotationPayload`] and reports all failures at
//! once, so that nothing is computed for an invalid request.

use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult, FieldError};
use crate::models::{QuotationPayload, QuotationRequest, UniformRequestLine};

use super::uniform_cost::{max_unit_price, not_invoiced_message};

/// Largest monthly net salary accepted, in pesos.
pub const MAX_NET_SALARY: u32 = 10_000_000;

/// Validates a payload against the catalog and inventory.
///
/// Collects one [`FieldError`] per failing field and returns them together
/// as [`EngineError::Validation`].
pub fn validate_request(
    payload: &QuotationPayload,
    loader: &ConfigLoader,
) -> EngineResult<QuotationRequest> {
    let mut errors = Vec::new();

    let business_line_known = loader.business_line(payload.business_line_id).is_some();
    if !business_line_known {
        errors.push(FieldError::new(
            "business_line_id",
            format!("business line {} does not exist", payload.business_line_id),
        ));
    }

    if loader.shift_type(payload.shift_type_id).is_none() {
        errors.push(FieldError::new(
            "shift_type_id",
            format!("shift type {} does not exist", payload.shift_type_id),
        ));
    }

    if loader.region(&payload.federal_entity_id).is_none() {
        errors.push(FieldError::new(
            "federal_entity_id",
            format!("federal entity '{}' does not exist", payload.federal_entity_id),
        ));
    }

    if payload.net_salary < Decimal::ZERO {
        errors.push(FieldError::new("net_salary", "must not be negative"));
    } else if payload.net_salary > Decimal::from(MAX_NET_SALARY) {
        errors.push(FieldError::new(
            "net_salary",
            format!("must not exceed {}", MAX_NET_SALARY),
        ));
    }

    let total_elements = match u32::try_from(payload.total_elements) {
        Ok(n) if n >= 1 => n,
        _ => {
            errors.push(FieldError::new("total_elements", "must be at least 1"));
            0
        }
    };

    let total_rest_days = match u32::try_from(payload.total_rest_days) {
        Ok(n) => n,
        Err(_) => {
            errors.push(FieldError::new("total_rest_days", "must not be negative"));
            0
        }
    };

    if payload.uniforms.is_empty() {
        errors.push(FieldError::new(
            "uniforms",
            "at least one uniform line is required",
        ));
    }

    let mut uniforms = Vec::with_capacity(payload.uniforms.len());
    for (index, line) in payload.uniforms.iter().enumerate() {
        match loader.inventory().stock_unit(line.uniform_stock_id) {
            None => errors.push(FieldError::new(
                format!("uniforms[{}].uniform_stock_id", index),
                format!("uniform stock {} does not exist", line.uniform_stock_id),
            )),
            Some(unit)
                if business_line_known
                    && max_unit_price(loader, unit, payload.business_line_id).is_none() =>
            {
                errors.push(FieldError::new(
                    format!("uniforms[{}].uniform_stock_id", index),
                    not_invoiced_message(unit.id, payload.business_line_id),
                ))
            }
            Some(_) => {}
        }

        match u32::try_from(line.quantity) {
            Ok(quantity) if quantity >= 1 => uniforms.push(UniformRequestLine {
                uniform_stock_id: line.uniform_stock_id,
                quantity,
            }),
            _ => errors.push(FieldError::new(
                format!("uniforms[{}].quantity", index),
                "must be at least 1",
            )),
        }
    }

    if !errors.is_empty() {
        tracing::warn!(
            error_count = errors.len(),
            fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
            "Quotation request failed validation"
        );
        return Err(EngineError::Validation { errors });
    }

    Ok(QuotationRequest {
        business_line_id: payload.business_line_id,
        shift_type_id: payload.shift_type_id,
        federal_entity_id: payload.federal_entity_id.clone(),
        net_salary: payload.net_salary,
        total_elements,
        total_rest_days,
        has_holidays: payload.has_holidays,
        has_day_31: payload.has_day_31,
        uniforms,
    })
}
