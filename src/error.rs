use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    ValidationError(String),
    BadRequest(String),

    // Resource errors
    NotFound(String),

    // Database errors
    DatabaseError(String),

    // External service errors
    SheetsError(String),
    ChatError(String),

    // Internal errors
    InternalError(String),

    // Assessment flow errors
    InvalidAnswerFormat(String),
    AssessmentNotComplete,
    CorruptedResults,
    ChatNotActive,
    ResultsStoreUnavailable,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::SheetsError(msg) => write!(f, "Sheets error: {}", msg),
            AppError::ChatError(msg) => write!(f, "Chat error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::InvalidAnswerFormat(input) => {
                write!(f, "Invalid answer format: {:?}", input)
            }
            AppError::AssessmentNotComplete => write!(f, "Assessment is not complete"),
            AppError::CorruptedResults => write!(f, "Stored results are corrupted"),
            AppError::ChatNotActive => write!(f, "Follow-up chat is not active"),
            AppError::ResultsStoreUnavailable => write!(f, "Results store is not configured"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, code, message) = match self {
            AppError::ValidationError(msg) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::BadRequest(msg) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::NotFound(msg) => {
                (actix_web::http::StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }
            AppError::DatabaseError(msg) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                msg.clone(),
            ),
            AppError::SheetsError(msg) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "SHEETS_ERROR",
                msg.clone(),
            ),
            AppError::ChatError(msg) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "CHAT_ERROR",
                msg.clone(),
            ),
            AppError::InternalError(msg) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
            AppError::InvalidAnswerFormat(input) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_ANSWER_FORMAT",
                format!(
                    "Answer must look like \"<score 1-5>. <label>\", got {:?}",
                    input
                ),
            ),
            AppError::AssessmentNotComplete => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "ASSESSMENT_NOT_COMPLETE",
                "Complete all three dimensions before requesting results".to_string(),
            ),
            AppError::CorruptedResults => (
                actix_web::http::StatusCode::CONFLICT,
                "CORRUPTED_RESULTS",
                "Stored results could not be recovered. Restart the assessment".to_string(),
            ),
            AppError::ChatNotActive => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "CHAT_NOT_ACTIVE",
                "Open the follow-up chat before sending chat messages".to_string(),
            ),
            AppError::ResultsStoreUnavailable => (
                actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                "RESULTS_STORE_UNAVAILABLE",
                "No database is configured for persisted results".to_string(),
            ),
        };

        HttpResponse::build(status).json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::DatabaseError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP request error: {:?}", err);
        AppError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Anyhow error: {:?}", err);
        AppError::InternalError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
