//! Axum Handlers for the REST API
//!
//! Both endpoints are stateless: the client sends everything needed for the
//! call and gets either `{request, body}` or `{request, error}` back.
//! It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use interview_core::error::InterviewError;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    models::{
        ErrorResponse, PlanPayload, PlanResponse, REQUEST_METHOD, TurnPayload, TurnResponse,
    },
    state::AppState,
};

pub enum ApiError {
    /// The body could not be read as the expected JSON.
    BadRequest(String),
    Interview(InterviewError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                warn!(%message, "Rejected request body");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
            }
            ApiError::Interview(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    error!(error = %err, status = status.as_u16(), "Interview request failed");
                } else {
                    warn!(error = %err, status = status.as_u16(), "Interview request rejected");
                }
                (status, Json(ErrorResponse::new(err.to_string()))).into_response()
            }
        }
    }
}

impl From<InterviewError> for ApiError {
    fn from(err: InterviewError) -> Self {
        Self::Interview(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Generate an interview plan from the user's settings.
#[utoipa::path(
    post,
    path = "/generate-interview-requirements",
    request_body = PlanPayload,
    responses(
        (status = 200, description = "Interview plan generated", body = PlanResponse),
        (status = 400, description = "Malformed or out-of-range settings", body = ErrorResponse),
        (status = 500, description = "Model provider failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn generate_interview_requirements(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlanPayload>, JsonRejection>,
) -> Result<Json<PlanResponse>, ApiError> {
    let Json(PlanPayload(request)) = payload?;
    info!(
        level = %request.interview_level,
        stage_hints = request.interview_process.len(),
        "Generating interview plan"
    );

    let body = state.interview_service.generate_plan(&request).await?;

    Ok(Json(PlanResponse {
        request: REQUEST_METHOD.to_string(),
        body,
    }))
}

/// Evaluate the latest answer and return the updated interview state.
#[utoipa::path(
    post,
    path = "/generate-interview",
    request_body = TurnPayload,
    responses(
        (status = 200, description = "Turn evaluated", body = TurnResponse),
        (status = 400, description = "Malformed request or answer too long", body = ErrorResponse),
        (status = 500, description = "Model provider failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn generate_interview(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TurnPayload>, JsonRejection>,
) -> Result<Json<TurnResponse>, ApiError> {
    let Json(TurnPayload { data }) = payload?;
    info!(
        answered = data.answers.iter().filter(|a| !a.is_empty()).count(),
        total = data.answers.len(),
        question = data.current_question.as_deref().unwrap_or("<opening>"),
        "Conducting interview turn"
    );

    let body = state.interview_service.conduct_turn(&data).await?;

    Ok(Json(TurnResponse {
        request: REQUEST_METHOD.to_string(),
        body,
    }))
}
