use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use super::domain::NegotiationRequest;
use super::NegotiationPlanner;

/// Router builder exposing the negotiation planner over HTTP.
pub fn negotiation_router(planner: Arc<NegotiationPlanner>) -> Router {
    Router::new()
        .route("/api/v1/hunt/negotiations", post(negotiate_handler))
        .with_state(planner)
}

pub(crate) async fn negotiate_handler(
    State(planner): State<Arc<NegotiationPlanner>>,
    axum::Json(request): axum::Json<NegotiationRequest>,
) -> Response {
    let plan = planner.plan(&request);
    (StatusCode::OK, axum::Json(plan)).into_response()
}
