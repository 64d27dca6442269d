//! API Models
//!
//! Request and response envelopes for the two interview endpoints. The
//! payloads themselves are the `interview_core::schema` types; they are
//! documented as free-form objects in the OpenAPI document.

use interview_core::schema::{InterviewConfiguration, PlanRequest, TurnRequest, TurnResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Every response carries the HTTP method that produced it.
pub const REQUEST_METHOD: &str = "POST";

/// The interview settings submitted to generate a plan.
#[derive(Deserialize, ToSchema, Debug)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct PlanPayload(pub PlanRequest);

/// A turn request wrapped under `data`.
#[derive(Deserialize, ToSchema, Debug)]
pub struct TurnPayload {
    #[schema(value_type = Object)]
    pub data: TurnRequest,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct PlanResponse {
    #[schema(example = "POST")]
    pub request: String,
    #[schema(value_type = Object)]
    pub body: InterviewConfiguration,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct TurnResponse {
    #[schema(example = "POST")]
    pub request: String,
    #[schema(value_type = Object)]
    pub body: TurnResult,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    #[schema(example = "POST")]
    pub request: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            request: REQUEST_METHOD.to_string(),
            error: error.into(),
        }
    }
}
