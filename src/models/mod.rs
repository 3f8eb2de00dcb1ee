//! Core data models for the Quotation Engine.
//!
//! This module contains the request, quotation and audit models used
//! throughout the engine.

mod audit;
mod quotation;
mod quotation_request;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use quotation::{Quotation, QuotationBreakdown, QuotationDraft, UniformDetail};
pub use quotation_request::{
    QuotationPayload, QuotationRequest, UniformLinePayload, UniformRequestLine,
};
