//! Quotation request models.
//!
//! [`QuotationPayload`] is the wire shape accepted by the calculate and
//! document endpoints. It is loosely typed so that out-of-range values can
//! be reported per field; validation turns it into a [`QuotationRequest`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One requested uniform line, as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniformLinePayload {
    /// The stock unit identifying the garment variant.
    pub uniform_stock_id: u32,
    /// Units per guard.
    pub quantity: i64,
}

/// Request body for the quotation endpoints.
///
/// # Example
///
/// ```
/// use quotation_engine::models::QuotationPayload;
///
/// let payload: QuotationPayload = serde_json::from_str(r#"{
///     "business_line_id": 1,
///     "shift_type_id": 1,
///     "federal_entity_id": "CDMX",
///     "net_salary": "9000.00",
///     "total_elements": 3,
///     "total_rest_days": 8,
///     "uniforms": [{ "uniform_stock_id": 1, "quantity": 2 }]
/// }"#).unwrap();
///
/// assert!(!payload.has_holidays);
/// assert!(!payload.has_day_31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationPayload {
    /// The business line being quoted.
    pub business_line_id: u32,
    /// The shift pattern.
    pub shift_type_id: u32,
    /// The federal entity (region) where the service is provided.
    pub federal_entity_id: String,
    /// Net monthly salary per guard.
    pub net_salary: Decimal,
    /// Number of guards requested.
    pub total_elements: i64,
    /// Rest days worked per month.
    pub total_rest_days: i64,
    /// Whether calendar holidays are worked.
    #[serde(default)]
    pub has_holidays: bool,
    /// Whether the 31st day of long months is paid.
    #[serde(default)]
    pub has_day_31: bool,
    /// Uniform selections per guard.
    #[serde(default)]
    pub uniforms: Vec<UniformLinePayload>,
}

/// A validated uniform line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniformRequestLine {
    /// The stock unit identifying the garment variant.
    pub uniform_stock_id: u32,
    /// Units per guard (at least 1).
    pub quantity: u32,
}

/// A validated staffing request.
///
/// Every foreign key has been checked against the catalog and inventory,
/// and `uniforms` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationRequest {
    /// The business line being quoted.
    pub business_line_id: u32,
    /// The shift pattern.
    pub shift_type_id: u32,
    /// The federal entity (region) where the service is provided.
    pub federal_entity_id: String,
    /// Net monthly salary per guard.
    pub net_salary: Decimal,
    /// Number of guards requested (at least 1).
    pub total_elements: u32,
    /// Rest days worked per month.
    pub total_rest_days: u32,
    /// Whether calendar holidays are worked.
    pub has_holidays: bool,
    /// Whether the 31st day of long months is paid.
    pub has_day_31: bool,
    /// Uniform selections per guard.
    pub uniforms: Vec<UniformRequestLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_payload_with_defaults() {
        let json = r#"{
            "business_line_id": 1,
            "shift_type_id": 2,
            "federal_entity_id": "NL",
            "net_salary": "12500.50",
            "total_elements": 4,
            "total_rest_days": 0
        }"#;

        let payload: QuotationPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.federal_entity_id, "NL");
        assert_eq!(payload.net_salary.to_string(), "12500.50");
        assert!(!payload.has_holidays);
        assert!(!payload.has_day_31);
        assert!(payload.uniforms.is_empty());
    }

    #[test]
    fn test_payload_accepts_negative_counts_for_validation() {
        let json = r#"{
            "business_line_id": 1,
            "shift_type_id": 1,
            "federal_entity_id": "CDMX",
            "net_salary": "9000",
            "total_elements": 0,
            "total_rest_days": -2,
            "uniforms": [{ "uniform_stock_id": 1, "quantity": -1 }]
        }"#;

        let payload: QuotationPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.total_elements, 0);
        assert_eq!(payload.total_rest_days, -2);
        assert_eq!(payload.uniforms[0].quantity, -1);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{
            "business_line_id": 1,
            "federal_entity_id": "CDMX",
            "net_salary": "9000",
            "total_elements": 1,
            "total_rest_days": 0
        }"#;

        let err = serde_json::from_str::<QuotationPayload>(json).unwrap_err();
        assert!(err.to_string().contains("shift_type_id"));
    }
}
