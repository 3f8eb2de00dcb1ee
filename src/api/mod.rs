//! HTTP API module for the Quotation Engine.
//!
//! This module provides the REST endpoints for pricing guard-staffing
//! quotations, rendering them as paginated documents, and retrieving
//! recorded quotations by folio.

mod document;
mod handlers;
mod response;
mod state;

pub use document::{DocumentPage, DocumentRow, DocumentSection, QuotationDocument, ROWS_PER_PAGE};
pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
