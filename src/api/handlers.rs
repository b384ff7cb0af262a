//! HTTP request handlers for the Net Salary Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_net_salary, calculate_pay_run};
use crate::error::EngineError;
use crate::models::{PayRunOutcome, PayRunResult};

use super::request::{CalculationRequest, PayRunRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, PayRunResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/pay-runs", post(pay_run_handler))
        .route("/tax-table", get(tax_table_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text, Vec::new())
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts one employee's gross salary and returns the net salary breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let employee_id = request.employee_id().to_string();
    let item = match request.into_item(config.limits()) {
        Ok(item) => item,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                violations = err.violations.len(),
                "Calculation request rejected"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    match calculate_net_salary(&item.employee, item.gross_salary, &item.components, config) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                net_salary = %result.per_period.net_salary.round_dp(2),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, CalculationResponse::new(result))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /pay-runs endpoint.
///
/// Items that fail conversion are reported as failed entries in their
/// input position; the rest are calculated as one pay run.
async fn pay_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    info!(
        correlation_id = %correlation_id,
        items = request.items.len(),
        "Processing pay run request"
    );

    let config = state.config();
    let mut rejected: Vec<Option<PayRunOutcome>> = Vec::with_capacity(request.items.len());
    let mut items = Vec::with_capacity(request.items.len());
    for item_request in request.items {
        let employee_id = item_request.employee_id().to_string();
        match item_request.into_item(config.limits()) {
            Ok(item) => {
                rejected.push(None);
                items.push(item);
            }
            Err(err) => rejected.push(Some(PayRunOutcome::Failed {
                employee_id,
                error: err.to_string(),
            })),
        }
    }

    let start_time = Instant::now();
    let run = match calculate_pay_run(&items, config) {
        Ok(run) => run,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Pay run failed"
            );
            return error_response(err);
        }
    };

    let mut totals = run.totals;
    let mut calculated = run.entries.into_iter();
    let mut entries = Vec::with_capacity(rejected.len());
    for slot in rejected {
        match slot {
            Some(failed) => {
                totals.employees_failed += 1;
                entries.push(failed);
            }
            None => entries.extend(calculated.next()),
        }
    }

    info!(
        correlation_id = %correlation_id,
        employees_paid = totals.employees_paid,
        employees_failed = totals.employees_failed,
        duration_us = start_time.elapsed().as_micros(),
        "Pay run completed"
    );
    json_response(
        StatusCode::OK,
        PayRunResponse::new(PayRunResult { entries, totals }),
    )
}

/// Handler for GET /tax-table endpoint.
async fn tax_table_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/ng_paye_2023").expect("Failed to load config");
        AppState::new(config)
    }

    fn create_valid_body() -> Value {
        json!({
            "employee": {
                "id": "emp_001",
                "name": "Adaeze Nwosu",
                "gender": "FEMALE",
                "employment_type": "FULL_TIME",
                "pay_frequency": "MONTHLY",
                "is_paye_applicable": true,
                "is_pension_applicable": true,
                "is_nhf_applicable": true,
                "is_nsitf_applicable": true
            },
            "gross_salary": "200000"
        })
    }

    async fn send(router: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap().clone();
        assert_eq!(content_type, "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());

        let (status, body) = send(
            router,
            "POST",
            "/calculate",
            Body::from(create_valid_body().to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: CalculationResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.result.employee_id, "emp_001");
        assert_eq!(response.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            response.result.per_period.net_salary.round_dp(2),
            Decimal::from_str("159625.33").unwrap()
        );
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, body) = send(router, "POST", "/calculate", Body::from("{invalid json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_gross_salary_returns_400() {
        let router = create_router(create_test_state());
        let mut body = create_valid_body();
        body.as_object_mut().unwrap().remove("gross_salary");

        let (status, body) = send(router, "POST", "/calculate", Body::from(body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("gross_salary"));
    }

    #[tokio::test]
    async fn test_zero_gross_returns_violation() {
        let router = create_router(create_test_state());
        let mut body = create_valid_body();
        body["gross_salary"] = json!("0");

        let (status, body) = send(router, "POST", "/calculate", Body::from(body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.violations.len(), 1);
        assert_eq!(error.violations[0].field, "gross_salary");
    }

    #[tokio::test]
    async fn test_tax_table_lists_brackets() {
        let router = create_router(create_test_state());

        let (status, body) = send(router, "GET", "/tax-table", Body::empty()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["brackets"].as_array().unwrap().len(), 6);
        assert_eq!(body["statutory_rates"]["pension_employee"], "8");
    }

    #[tokio::test]
    async fn test_pay_run_keeps_rejected_items_in_place() {
        let router = create_router(create_test_state());
        let mut bad = create_valid_body();
        bad["employee"]["id"] = json!("emp_002");
        bad["employee"]["pay_frequency"] = json!("DAILY");
        let mut good = create_valid_body();
        good["employee"]["id"] = json!("emp_003");
        let body = json!({ "items": [create_valid_body(), bad, good] });

        let (status, body) = send(router, "POST", "/pay-runs", Body::from(body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        let response: PayRunResponse = serde_json::from_value(body).unwrap();
        let run = response.result;
        assert_eq!(run.totals.employees_paid, 2);
        assert_eq!(run.totals.employees_failed, 1);
        assert_eq!(run.entries[0].calculation().unwrap().employee_id, "emp_001");
        match &run.entries[1] {
            PayRunOutcome::Failed { employee_id, error } => {
                assert_eq!(employee_id, "emp_002");
                assert!(error.contains("pay_frequency"));
            }
            other => panic!("Expected failed entry, got {:?}", other),
        }
        assert_eq!(run.entries[2].calculation().unwrap().employee_id, "emp_003");
    }
}
