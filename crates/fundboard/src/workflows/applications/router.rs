use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::IncomingApplication;
use super::reconciler::IntakeError;
use super::service::{ApplicationIntakeService, IntakeServiceError};
use super::store::TableStore;

/// Router builder exposing the intake endpoints.
pub fn intake_router<S>(service: Arc<ApplicationIntakeService<S>>) -> Router
where
    S: TableStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<S>).get(leaderboard_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
    axum::Json(payload): axum::Json<IncomingApplication>,
) -> Response
where
    S: TableStore + 'static,
{
    match service.submit(&payload) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(IntakeServiceError::Intake(IntakeError::MissingField(error))) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(IntakeServiceError::Store(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn leaderboard_handler<S>(
    State(service): State<Arc<ApplicationIntakeService<S>>>,
) -> Response
where
    S: TableStore + 'static,
{
    match service.leaderboard() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(IntakeServiceError::Store(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
