//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::VerificationError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error summary
    pub error: String,
    /// Human-readable error details
    pub details: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// Fallible endpoints return `Result<T, ApiError>`, and rejected request bodies are mapped
/// to `BadRequest`, so every error response has the same shape.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Reasoning service replied with something that is not a verification result (502)
    #[error("Reasoning service returned an invalid response")]
    InvalidReasoningOutput,

    /// External service error (502)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn summary(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::InvalidReasoningOutput => "invalid_reasoning_output",
            ApiError::ExternalService(_) => "external_service_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidReasoningOutput | ApiError::ExternalService(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.summary();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            request_id = %request_id,
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            details: self.to_string(),
            request_id,
        })
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::MissingContent => ApiError::BadRequest(err.to_string()),
            VerificationError::Reasoning(e) => ApiError::ExternalService(e.to_string()),
            // raw reply is already in the server log
            VerificationError::InvalidOutput(_) => ApiError::InvalidReasoningOutput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::llm::ReasonerError;
    use crate::service::normalizer::NormalizeError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (VerificationError::MissingContent, StatusCode::BAD_REQUEST),
            (
                VerificationError::Reasoning(ReasonerError::EmptyReply),
                StatusCode::BAD_GATEWAY,
            ),
            (
                VerificationError::InvalidOutput(NormalizeError::InvalidReasoningOutput(
                    "expected value".to_string(),
                )),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transport_details_are_propagated() {
        let err = ApiError::from(VerificationError::Reasoning(ReasonerError::Status {
            status: 402,
            body: "payment required".to_string(),
        }));
        let details = err.to_string();
        assert!(details.contains("402"));
        assert!(details.contains("payment required"));
    }

    #[test]
    fn test_invalid_output_hides_payload() {
        let err = ApiError::from(VerificationError::InvalidOutput(
            NormalizeError::InvalidReasoningOutput("secret raw text".to_string()),
        ));
        assert!(!err.to_string().contains("secret raw text"));
    }
}
