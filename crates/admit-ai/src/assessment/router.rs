use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::advisor::{AdmissionAdvisor, AssessmentError, AssessmentRequest};
use super::catalog::CategoryId;

#[derive(Debug, Deserialize)]
pub struct TuneRequest {
    pub request: AssessmentRequest,
    pub adjustments: BTreeMap<CategoryId, String>,
}

/// Router exposing the assessment engine over JSON.
pub fn assessment_router(advisor: Arc<AdmissionAdvisor>) -> Router {
    Router::new()
        .route("/api/v1/catalog/questions", get(questions_handler))
        .route("/api/v1/catalog/regions", get(regions_handler))
        .route("/api/v1/assessments", post(assess_handler))
        .route("/api/v1/assessments/tune", post(tune_handler))
        .with_state(advisor)
}

pub(crate) async fn questions_handler(State(advisor): State<Arc<AdmissionAdvisor>>) -> Response {
    (StatusCode::OK, Json(advisor.questions())).into_response()
}

pub(crate) async fn regions_handler(State(advisor): State<Arc<AdmissionAdvisor>>) -> Response {
    let regions: Vec<_> = advisor.weights().regions().collect();
    let payload = json!({
        "regions": regions,
        "max_regions": advisor.max_regions(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn assess_handler(
    State(advisor): State<Arc<AdmissionAdvisor>>,
    Json(request): Json<AssessmentRequest>,
) -> Response {
    match advisor.assess(&request) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn tune_handler(
    State(advisor): State<Arc<AdmissionAdvisor>>,
    Json(body): Json<TuneRequest>,
) -> Response {
    match advisor.tune(&body.request, &body.adjustments) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AssessmentError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        error!(error = %err, "assessment failed on reference data");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
