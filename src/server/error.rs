//! JSON error responses for the HTTP backend.

use crate::core::ValidationError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Every request failure the backend reports. All of them are the caller's
/// fault and map to `400 Bad Request`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Request body must be a JSON object: {0}")]
    InvalidBody(String),

    #[error("mode is required")]
    MissingMode,

    #[error("Unknown calculation mode: {0}")]
    UnknownMode(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl ApiError {
    fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::Validation(err) => Some(err.field()),
            ApiError::MissingMode | ApiError::UnknownMode(_) => Some("mode"),
            ApiError::InvalidBody(_) => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            field: self.field(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn validation_errors_name_the_field() {
        let (status, body) = body_of(ApiError::from(ValidationError::NotPositive {
            field: "loanAmount",
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "loanAmount must be greater than zero", "field": "loanAmount"})
        );
    }

    #[actix_web::test]
    async fn body_errors_omit_the_field() {
        let (status, body) = body_of(ApiError::InvalidBody("expected value".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("field").is_none());
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Request body must be a JSON object")
        );
    }
}
