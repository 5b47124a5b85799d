//! Centralized error handling.
//!
//! Provides a unified error type for the entire application, and the
//! envelope-shaped HTTP rendering used by every handler.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::types::{ApiResponse, ResponseError};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Display of the innermost error in the source chain
    pub fn root_cause(&self) -> String {
        let mut current: &dyn StdError = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current.to_string()
    }

    /// `{field: "<field>_<rule>"}` for validation failures
    pub fn validation_map(&self) -> Option<BTreeMap<String, String>> {
        let AppError::Validation(errors) = self else {
            return None;
        };

        let map = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let field = field.to_lowercase();
                    let tag = format!("{}_{}", field, e.code);
                    (field, tag)
                })
            })
            .collect();

        Some(map)
    }

    /// Build the envelope error body.
    pub fn to_response_error(&self, expose_stack: bool) -> ResponseError {
        match self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }

        ResponseError {
            code: self.code().to_string(),
            cause: self.root_cause(),
            message: self.to_string(),
            stack: if expose_stack {
                format!("{:?}", self)
            } else {
                String::new()
            },
            validation: self.validation_map(),
        }
    }
}

/// Error bound to the request it failed, rendered as the response envelope.
#[derive(Debug)]
pub struct ApiError {
    pub request_id: String,
    pub expose_stack: bool,
    pub error: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = ApiResponse::failure(
            self.request_id,
            self.error.to_response_error(self.expose_stack),
        );

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Handler result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
        #[validate(length(min = 1))]
        first_name: String,
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Database(sea_orm::DbErr::Custom("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_map_uses_field_and_rule() {
        let signup = Signup {
            email: "not-an-email".to_string(),
            first_name: String::new(),
        };
        let error = AppError::from(signup.validate().unwrap_err());
        let map = error.validation_map().unwrap();

        assert_eq!(map.get("email").map(String::as_str), Some("email_email"));
        assert_eq!(map.get("first_name").map(String::as_str), Some("first_name_length"));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_cause_is_driver_message() {
        let error = AppError::from(sea_orm::DbErr::Custom("connection refused".into()));
        let body = error.to_response_error(true);

        assert_eq!(body.code, "DATABASE_ERROR");
        assert!(body.message.contains("connection refused"));
        assert!(body.cause.contains("connection refused"));
        assert!(!body.stack.is_empty());
        assert!(body.validation.is_none());
    }

    #[test]
    fn stack_hidden_when_not_exposed() {
        let body = AppError::NotFound.to_response_error(false);
        assert!(body.stack.is_empty());
        assert_eq!(body.cause, "Resource not found");
    }

    #[test]
    fn missing_option_maps_to_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
    }
}
