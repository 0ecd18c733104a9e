// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::assessment::bank::{BankError, QuestionId};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized (instructor secret or token rejected)
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity: submission without an answer for every question
    IncompleteAnswers { missing: Vec<QuestionId> },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::IncompleteAnswers { missing } => {
                write!(f, "{} question(s) left unanswered: {:?}", missing.len(), missing)
            }
            other => write!(f, "{:?}", other),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::IncompleteAnswers { missing } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Please answer every question before submitting",
                    "missing": missing,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
