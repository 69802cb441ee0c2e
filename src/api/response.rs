use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    data: T,
}

/// Successful reply from a desk route: campaigns, source types, UTM records
/// or a derived value, wrapped as `{"success": true, "data": ...}`.
/// Failures take the other path through [`ApiError`].
#[derive(Debug)]
pub struct ApiResponse<T> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// 201, for a row that was just appended to the spreadsheet
    pub fn created(data: T) -> Self {
        Self {
            data,
            status: StatusCode::CREATED,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            success: true,
            data: self.data,
        };
        (self.status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
