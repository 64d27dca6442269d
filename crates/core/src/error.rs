use crate::limits::ValidationError;

/// Errors produced while generating a plan or a turn.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    /// The model provider (or the interview server) rejected the call.
    #[error("{message}")]
    Upstream { message: String, status: Option<u16> },
    #[error("Model response contained no content")]
    EmptyResponse,
    #[error("Model refused the request: {0}")]
    Refusal(String),
    #[error("Failed to decode structured output: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Internal(String),
}

impl InterviewError {
    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            InterviewError::Upstream { status, .. } => status.unwrap_or(500),
            InterviewError::Invalid(_) => 400,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_passthrough_and_default() {
        let rate_limited = InterviewError::Upstream {
            message: "Rate limit reached".to_string(),
            status: Some(429),
        };
        assert_eq!(rate_limited.status_code(), 429);
        assert_eq!(rate_limited.to_string(), "Rate limit reached");

        let unknown = InterviewError::Upstream {
            message: "boom".to_string(),
            status: None,
        };
        assert_eq!(unknown.status_code(), 500);
        assert_eq!(InterviewError::EmptyResponse.status_code(), 500);
        assert_eq!(
            InterviewError::Network("connection refused".to_string()).status_code(),
            500
        );
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: InterviewError = ValidationError::AnswerTooLong {
            index: Some(2),
            length: 20,
            limit: 10,
        }
        .into();
        assert_eq!(err.status_code(), 400);
    }
}
