use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::error::AppError;

use super::controller::{FormController, SubmitRejected};
use super::domain::{FieldUpdate, InvestmentDetails, SubmissionState};
use super::notifier::SubmissionNotifier;

/// Router builder exposing the form controller to an out-of-process renderer.
pub fn form_router<N>(controller: Arc<FormController<N>>) -> Router
where
    N: SubmissionNotifier + 'static,
{
    Router::new()
        .route("/api/v1/form", get(snapshot_handler::<N>))
        .route("/api/v1/form/fields", post(update_field_handler::<N>))
        .route("/api/v1/form/reset", post(reset_handler::<N>))
        .route("/api/v1/form/submit", post(submit_handler::<N>))
        .route("/api/v1/form/validate", post(validate_handler::<N>))
        .with_state(controller)
}

pub(crate) async fn snapshot_handler<N>(State(controller): State<Arc<FormController<N>>>) -> Response
where
    N: SubmissionNotifier + 'static,
{
    (StatusCode::OK, axum::Json(controller.snapshot())).into_response()
}

pub(crate) async fn update_field_handler<N>(
    State(controller): State<Arc<FormController<N>>>,
    payload: Result<axum::Json<FieldUpdate>, JsonRejection>,
) -> Response
where
    N: SubmissionNotifier + 'static,
{
    let axum::Json(update) = match payload {
        Ok(update) => update,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    controller.set_field(update);
    (StatusCode::OK, axum::Json(controller.snapshot())).into_response()
}

pub(crate) async fn reset_handler<N>(State(controller): State<Arc<FormController<N>>>) -> Response
where
    N: SubmissionNotifier + 'static,
{
    let snapshot = controller.reset();
    (StatusCode::OK, axum::Json(snapshot)).into_response()
}

pub(crate) async fn submit_handler<N>(State(controller): State<Arc<FormController<N>>>) -> Response
where
    N: SubmissionNotifier + 'static,
{
    match controller.spawn_submit() {
        Ok(notice) => {
            let payload = json!({
                "submission_id": notice.submission_id,
                "submitted_at": notice.submitted_at,
                "state": SubmissionState::Submitting,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(rejected) => {
            let mut payload = json!({
                "error": rejected.to_string(),
            });
            let status = match &rejected {
                SubmitRejected::Invalid(errors) => {
                    payload["errors"] = json!(errors);
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                SubmitRejected::InProgress => StatusCode::CONFLICT,
            };
            (status, axum::Json(payload)).into_response()
        }
    }
}

/// Validate a posted record without touching the controller's form. Bodies that do not
/// decode as a complete record are answered with 400.
pub(crate) async fn validate_handler<N>(
    State(controller): State<Arc<FormController<N>>>,
    payload: Result<axum::Json<InvestmentDetails>, JsonRejection>,
) -> Response
where
    N: SubmissionNotifier + 'static,
{
    let axum::Json(record) = match payload {
        Ok(record) => record,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let errors = controller.validator().validate(&record);
    let payload = json!({
        "valid": errors.is_empty(),
        "errors": errors,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
