//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Message is returned to the client verbatim.
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Invariant(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        } else {
            tracing::debug!(error = %self, code, "request rejected");
        }
        // Server-side detail stays in the log.
        let message = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_keep_their_message() {
        let err = AppError::NotFound("Estudante não encontrado!".into());
        assert_eq!(err.to_string(), "Estudante não encontrado!");
        assert_eq!(err.status_and_code(), (StatusCode::NOT_FOUND, "not_found"));

        let err = AppError::Conflict("Estudante já existe!".into());
        assert_eq!(err.to_string(), "Estudante já existe!");
        assert_eq!(err.status_and_code(), (StatusCode::CONFLICT, "conflict"));
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn persistence_failures_hide_driver_detail() {
        let err = AppError::from(sqlx::Error::Protocol("disk I/O error at page 7".into()));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "database_error");
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn invariant_failures_hide_detail() {
        let response = AppError::Invariant("two rows with id x".into()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn not_found_body_carries_the_message() {
        let response = AppError::NotFound("Estudante não encontrado!".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": { "code": "not_found", "message": "Estudante não encontrado!" }
            })
        );
    }

    #[test]
    fn config_errors_name_the_variable() {
        let err = AppError::from(ConfigError::Invalid {
            var: "BIND_ADDR",
            reason: "not a socket address".into(),
        });
        assert_eq!(err.to_string(), "invalid BIND_ADDR: not a socket address");
        assert_eq!(err.status_and_code().1, "config_error");
    }
}
