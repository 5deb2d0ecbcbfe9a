use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateProfile, EvaluationId, JobPosting};
use super::repository::{EvaluationRepository, NotificationPublisher, RepositoryError};
use super::service::{JobMatchingService, PipelineServiceError};

/// Request payload for a pipeline run.
#[derive(Debug, Deserialize)]
pub struct MatchRunRequest {
    pub postings: Vec<JobPosting>,
    pub profile: CandidateProfile,
}

/// Router builder exposing the matching pipeline over HTTP.
pub fn matching_router<R, N>(service: Arc<JobMatchingService<R, N>>) -> Router
where
    R: EvaluationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/hunt/matches", post(run_handler::<R, N>))
        .route(
            "/api/v1/hunt/evaluations/:evaluation_id",
            get(evaluation_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn run_handler<R, N>(
    State(service): State<Arc<JobMatchingService<R, N>>>,
    axum::Json(request): axum::Json<MatchRunRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.run(request.postings, &request.profile) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(PipelineServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "evaluation already recorded",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluation_handler<R, N>(
    State(service): State<Arc<JobMatchingService<R, N>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(PipelineServiceError::Repository(RepositoryError::NotFound)) => {
            // Unknown ids read as still-pending rather than leaking which
            // evaluations exist.
            let payload = json!({
                "evaluation_id": id.0,
                "status": "pending",
                "decision_rationale": "evaluation not yet recorded",
                "match_score": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
