//! An `InterviewService` that talks to the interview HTTP API.

use crate::{
    error::InterviewError,
    schema::{InterviewConfiguration, PlanRequest, TurnRequest, TurnResult},
    service::InterviewService,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;

pub const PLAN_PATH: &str = "generate-interview-requirements";
pub const TURN_PATH: &str = "generate-interview";

/// Response envelope shared by both endpoints.
#[derive(Deserialize)]
struct Envelope<T> {
    body: Option<T>,
    error: Option<String>,
}

pub struct HttpInterviewService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInterviewService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, InterviewError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| InterviewError::Network(e.to_string()))?;

        let status = response.status();
        // An undecodable success body is still a failure, reported as 500.
        let envelope: Envelope<T> = response.json().await.map_err(|e| InterviewError::Upstream {
            message: format!("Unreadable response from {url}: {e}"),
            status: (!status.is_success()).then(|| status.as_u16()),
        })?;

        if status.is_success() {
            envelope.body.ok_or(InterviewError::EmptyResponse)
        } else {
            Err(InterviewError::Upstream {
                message: envelope.error.unwrap_or_else(|| status.to_string()),
                status: Some(status.as_u16()),
            })
        }
    }
}

#[async_trait]
impl InterviewService for HttpInterviewService {
    async fn generate_plan(
        &self,
        request: &PlanRequest,
    ) -> Result<InterviewConfiguration, InterviewError> {
        self.post(PLAN_PATH, request).await
    }

    async fn conduct_turn(&self, request: &TurnRequest) -> Result<TurnResult, InterviewError> {
        self.post(TURN_PATH, &json!({ "data": request })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schema::{InterviewStatus, fixtures},
        test_server::serve_once,
    };
    use serde_json::json;

    #[test]
    fn test_base_url_is_normalised() {
        let service = HttpInterviewService::new("http://localhost:3000/");
        assert_eq!(service.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let service = HttpInterviewService::new("http://127.0.0.1:9");
        let err = service
            .conduct_turn(&TurnRequest::opening(fixtures::screening()))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::Network(_)));
    }

    #[tokio::test]
    async fn test_turn_is_posted_under_data() {
        let body = json!({
            "request": "POST",
            "body": fixtures::turn_result("Welcome", InterviewStatus::InProgress)
        });
        let (base, request_line) = serve_once(200, body.to_string()).await;

        let turn = HttpInterviewService::new(base)
            .conduct_turn(&TurnRequest::opening(fixtures::screening()))
            .await
            .unwrap();
        assert_eq!(turn.overall_evaluation.summary, "Welcome");
        assert_eq!(request_line.await.unwrap(), "POST /generate-interview HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_envelope_keeps_status() {
        let body = json!({ "request": "POST", "error": "Rate limit reached" });
        let (base, _) = serve_once(429, body.to_string()).await;

        let err = HttpInterviewService::new(base)
            .generate_plan(&fixtures::plan_request())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.to_string(), "Rate limit reached");
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_a_server_error() {
        let (base, _) = serve_once(200, "<html>proxy page</html>").await;

        let err = HttpInterviewService::new(base)
            .conduct_turn(&TurnRequest::opening(fixtures::screening()))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::Upstream { status: None, .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_success_without_body_is_empty() {
        let (base, _) = serve_once(200, json!({ "request": "POST" }).to_string()).await;

        let err = HttpInterviewService::new(base)
            .conduct_turn(&TurnRequest::opening(fixtures::screening()))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::EmptyResponse));
    }
}
