use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::credentials::{error::CredentialError, service::CredentialService};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<CredentialService>,
}

impl AppState {
    pub fn new(credential_service: Arc<CredentialService>) -> Self {
        Self { credential_service }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Credential(err) => match err {
                CredentialError::Conflict => (
                    StatusCode::CONFLICT,
                    "account with same email or phone already exists".to_string(),
                ),
                CredentialError::Unauthorized => (
                    StatusCode::UNAUTHORIZED,
                    "invalid credentials".to_string(),
                ),
                CredentialError::InvalidToken(_) => {
                    (StatusCode::UNAUTHORIZED, "invalid token".to_string())
                }
                CredentialError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (CredentialError::Conflict.into(), StatusCode::CONFLICT),
            (CredentialError::Unauthorized.into(), StatusCode::UNAUTHORIZED),
            (
                CredentialError::InvalidToken("expired".into()).into(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                CredentialError::Internal("db down".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
