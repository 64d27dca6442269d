//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the two interview endpoints and OpenAPI documentation.

use crate::{
    handlers,
    models::{ErrorResponse, PlanPayload, PlanResponse, TurnPayload, TurnResponse},
    state::AppState,
};

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::generate_interview_requirements,
        handlers::generate_interview,
    ),
    components(
        schemas(PlanPayload, PlanResponse, TurnPayload, TurnResponse, ErrorResponse)
    ),
    tags(
        (name = "Interview API", description = "Plan generation and turn evaluation for mock interviews")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route(
            "/generate-interview-requirements",
            post(handlers::generate_interview_requirements),
        )
        .route("/generate-interview", post(handlers::generate_interview))
        .with_state(app_state);

    // Merge the stateful routes with the stateless Swagger UI.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
