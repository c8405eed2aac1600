use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::LoanApplication;
use super::engine::DecisionEngine;
use super::evaluation::EvaluationError;
use super::narrative::UnderwriterSchema;

/// Router builder exposing the decision engine over HTTP.
pub fn underwriting_router(engine: Arc<DecisionEngine>) -> Router {
    Router::new()
        .route("/api/v1/underwriting/evaluate", post(evaluate_handler))
        .route("/api/v1/underwriting/narrative/schema", get(schema_handler))
        .with_state(engine)
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<DecisionEngine>>,
    axum::Json(application): axum::Json<LoanApplication>,
) -> Response {
    match engine.evaluate(&application) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error @ EvaluationError::SegmentMismatch { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn schema_handler() -> Response {
    (StatusCode::OK, axum::Json(UnderwriterSchema::current())).into_response()
}
