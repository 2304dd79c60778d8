//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeline::InvalidQueryError;
use recommender::RecommendError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),
    /// Malformed request body or parameters
    #[error("{0}")]
    BadRequest(String),
    /// JSON body axum could not read or deserialize
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),
    /// Query options rejected by the query engine
    #[error(transparent)]
    InvalidQuery(#[from] InvalidQueryError),
    /// Recommendation could not be produced for this input
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error) = match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message)),
            AppError::BadRequest(_) | AppError::Recommend(RecommendError::NoProfiles) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", message))
            }
            AppError::JsonBody(rejection) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("BAD_REQUEST", "Invalid JSON body").with_details(rejection.body_text()),
            ),
            AppError::InvalidQuery(_) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_QUERY", message),
            ),
            AppError::Recommend(RecommendError::InsufficientCandidates { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("INSUFFICIENT_CANDIDATES", message),
            ),
            AppError::Internal(_) => {
                error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", "Internal server error").with_details(message),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<RecommendError>() {
            Ok(e) => AppError::Recommend(e),
            Err(err) => AppError::Internal(format!("{:#}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::InvalidQuery(InvalidQueryError::UnknownOption { key: "x".into() }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Recommend(RecommendError::InsufficientCandidates { found: 1, required: 5 }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_anyhow_recommend_error_is_recovered() {
        let err = anyhow::Error::from(RecommendError::NoProfiles);
        assert!(matches!(AppError::from(err), AppError::Recommend(RecommendError::NoProfiles)));
    }
}
