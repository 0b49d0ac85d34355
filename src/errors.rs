use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Reasons a quiz or chat request is rejected before any model call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestViolation {
    #[error("Topic cannot be empty")]
    EmptyTopic,

    #[error("Topic too long ({length} characters, max {max})")]
    TopicTooLong { length: usize, max: usize },

    #[error("Topic contains non-educational content ('{term}')")]
    ForbiddenTopic { term: String },

    #[error("At least one difficulty is required")]
    NoDifficulties,

    #[error("Invalid difficulty '{label}'. Allowed: easy, medium, hard")]
    UnknownDifficulty { label: String },

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Invalid session id '{0}'")]
    InvalidSessionId(String),
}

impl RequestViolation {
    pub fn rule(&self) -> &'static str {
        match self {
            RequestViolation::EmptyTopic => "EMPTY_TOPIC",
            RequestViolation::TopicTooLong { .. } => "TOPIC_TOO_LONG",
            RequestViolation::ForbiddenTopic { .. } => "FORBIDDEN_TOPIC",
            RequestViolation::NoDifficulties => "NO_DIFFICULTIES",
            RequestViolation::UnknownDifficulty { .. } => "UNKNOWN_DIFFICULTY",
            RequestViolation::EmptyMessage => "EMPTY_MESSAGE",
            RequestViolation::InvalidSessionId(_) => "INVALID_SESSION_ID",
        }
    }
}

/// Failure of the external generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("model API error: {0}")]
    Api(String),

    #[error("model reply contained no choices")]
    EmptyReply,

    #[error("model call timed out after {0}s")]
    Timeout(u64),
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestViolation),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Generation failed: {0}")]
    GenerationFailure(#[from] GenerationFailure),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(violation) => violation.rule(),
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::GenerationFailure(_) => "GENERATION_FAILURE",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub rule: &'static str,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::GenerationFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            rule: self.error_code(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StorageError(format!("JSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
