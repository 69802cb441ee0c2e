// HTTP API Error Types
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::form::FormError;
use crate::sheets::{self, SheetError};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 409 Conflict
    Conflict(String),

    // 502 Bad Gateway (Google rejected or failed the call)
    BadGateway(String),
}

/// Which way the failed call was going, for the terse user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Load,
    Save,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Conflict(_) => 409,
            ApiError::BadGateway(_) => 502,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::BadGateway(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
            "error_code": self.error_code()
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    /// Log the full provider error and keep only a terse message for the client.
    pub fn from_sheets(err: sheets::Error, direction: Direction) -> Self {
        match err {
            sheets::Error::Duplicate { utm_url } => {
                tracing::warn!("Duplicate UTM URL rejected: {}", utm_url);
                ApiError::conflict("UTM URL already exists")
            }
            sheets::Error::Auth(auth_err) => {
                tracing::error!("Google token exchange failed: {}", auth_err);
                ApiError::bad_gateway("Failed to authenticate with Google Sheets")
            }
            sheets::Error::Sheet(sheet_err) => {
                match &sheet_err {
                    SheetError::MalformedRow { .. } => {
                        tracing::error!("Spreadsheet contains a malformed row: {}", sheet_err)
                    }
                    _ => tracing::error!("Google Sheets call failed: {}", sheet_err),
                }
                match direction {
                    Direction::Load => ApiError::bad_gateway("Failed to load data from Google Sheets"),
                    Direction::Save => ApiError::bad_gateway("Failed to save data to Google Sheets"),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
