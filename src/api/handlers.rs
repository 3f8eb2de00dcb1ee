//! HTTP request handlers for the Quotation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::price_quotation;
use crate::error::EngineResult;
use crate::models::{Quotation, QuotationPayload};

use super::document::QuotationDocument;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quotations/calculate", post(calculate_handler))
        .route("/quotations/document", post(document_handler))
        .route("/quotations/:folio", get(get_quotation_handler))
        .with_state(state)
}

/// Handler for POST /quotations/calculate.
///
/// Prices the request, records it under a new folio and returns the
/// quotation.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuotationPayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quotation request");

    let payload = match parse_payload(correlation_id, payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match price_and_record(&state, &payload) {
        Ok(quotation) => {
            info!(
                correlation_id = %correlation_id,
                folio = %quotation.folio,
                sale_price = %quotation.draft.sale_price,
                total_monthly_price = %quotation.draft.total_monthly_price,
                duration_us = quotation.draft.audit_trace.duration_us,
                "Quotation calculated"
            );
            json_response(StatusCode::OK, &quotation)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Quotation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /quotations/document.
///
/// Same computation as the calculate endpoint, returned as a paginated
/// document.
async fn document_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuotationPayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quotation document request");

    let payload = match parse_payload(correlation_id, payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match price_and_record(&state, &payload) {
        Ok(quotation) => {
            let document = QuotationDocument::build(&quotation, state.config());
            info!(
                correlation_id = %correlation_id,
                folio = %quotation.folio,
                pages = document.total_pages,
                "Quotation document generated"
            );
            json_response(StatusCode::OK, &document)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Quotation document failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /quotations/{folio}.
async fn get_quotation_handler(
    State(state): State<AppState>,
    Path(folio): Path<String>,
) -> Response {
    match state.recorder().get(&folio) {
        Some(quotation) => json_response(StatusCode::OK, &quotation),
        None => {
            warn!(folio = %folio, "Quotation not found");
            ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::quotation_not_found(&folio),
            }
            .into_response()
        }
    }
}

fn price_and_record(state: &AppState, payload: &QuotationPayload) -> EngineResult<Quotation> {
    let draft = price_quotation(payload, state.config())?;
    state.recorder().record(draft)
}

/// Unwraps the JSON body or builds the 400 response for a bad one.
fn parse_payload(
    correlation_id: Uuid,
    payload: Result<Json<QuotationPayload>, JsonRejection>,
) -> Result<QuotationPayload, Response> {
    let rejection = match payload {
        Ok(Json(payload)) => return Ok(payload),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") || body_text.contains("invalid type") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, ReferenceConfig};
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/guard_staffing").expect("Failed to load config");
        AppState::new(config)
    }

    fn valid_body() -> Value {
        json!({
            "business_line_id": 1,
            "shift_type_id": 1,
            "federal_entity_id": "CDMX",
            "net_salary": "9000.00",
            "total_elements": 3,
            "total_rest_days": 8,
            "uniforms": [
                { "uniform_stock_id": 1, "quantity": 2 },
                { "uniform_stock_id": 4, "quantity": 2 },
                { "uniform_stock_id": 6, "quantity": 1 }
            ]
        })
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_recorded_quotation() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let (status, body) =
            send(router, post_json("/quotations/calculate", valid_body().to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sale_price"], "20117.61");
        let folio = body["folio"].as_str().unwrap();
        assert!(state.recorder().get(folio).is_some());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, body) =
            send(router, post_json("/quotations/calculate", "{invalid json".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let router = create_router(create_test_state());
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("net_salary");

        let (status, body) = send(router, post_json("/quotations/calculate", body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_wage_unit_returns_404_and_records_nothing() {
        let base = ConfigLoader::load("./config/guard_staffing").expect("Failed to load config");
        let config = base.config();
        let mut social_security = config.social_security().clone();
        social_security.wage_unit_values.clear();
        let config = ReferenceConfig::new(
            config.pricing().clone(),
            config.labor().clone(),
            social_security,
            config.tax().clone(),
            config.catalog().clone(),
            config.inventory().clone(),
        )
        .unwrap();
        let state = AppState::new(ConfigLoader::from_config(config));
        let router = create_router(state.clone());

        let (status, body) =
            send(router, post_json("/quotations/calculate", valid_body().to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "REFERENCE_DATA_NOT_FOUND");
        assert!(body["message"].as_str().unwrap().contains("wage_unit_values"));
        assert!(state.recorder().store().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_folio_returns_404() {
        let router = create_router(create_test_state());

        let request = Request::builder()
            .uri("/quotations/COT-19700101-00000000")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "QUOTATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_document_endpoint_returns_pages() {
        let router = create_router(create_test_state());

        let (status, body) =
            send(router, post_json("/quotations/document", valid_body().to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["total_pages"].as_u64().unwrap() >= 1);
        assert_eq!(
            body["pages"].as_array().unwrap().len() as u64,
            body["total_pages"].as_u64().unwrap()
        );
    }
}
