use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to a stable
/// `error` kind string and an HTTP status so the frontend can tell a
/// retryable duplicate from bad input.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("duplicate SKU code: {0}")]
    DuplicateCode(String),
    #[error("{0}")]
    InvalidLocation(String),
    #[error("{0}")]
    LocationInUse(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::DuplicateCode(_) => "duplicate_code",
            AppError::InvalidLocation(_) => "invalid_location",
            AppError::LocationInUse(_) => "location_in_use",
            AppError::NotFound(_) => "not_found",
            AppError::Database(_) => "database",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateCode(_) => StatusCode::CONFLICT,
            AppError::InvalidLocation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::LocationInUse(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // A unique violation on skus.sku means two clients raced past the
        // pre-check; the caller sees it as the same duplicate rejection.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::DuplicateCode(db_err.message().to_string());
            }
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Database(err) = &self {
            log::error!("database error: {}", err);
        }
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
