// handlers/utm_records.rs - /api/utm-records and /api/utm-url handlers

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::response::{ApiResponse, ApiResult};
use crate::api::AppState;
use crate::error::{ApiError, Direction};
use crate::form::UtmForm;
use crate::models::{Department, UtmRecord};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExistsQuery {
    pub utm_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistsResponse {
    pub utm_url: String,
    pub exists: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtmUrlResponse {
    pub utm_url: String,
}

/**
 * GET /api/utm-records - List generated links
 *
 * Optional `?department=sales` narrows the list to one department. Note that
 * `utmId` is positional and changes when rows above it change.
 */
pub async fn utm_record_list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<UtmRecord>> {
    let Query(query) = query?;

    let mut records = state
        .repo
        .get_utm_records()
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Load))?;

    if let Some(department) = query.department.as_deref() {
        let department = Department::from_cell(department);
        records.retain(|r| r.department == department);
    }

    Ok(ApiResponse::success(records))
}

/// GET /api/utm-records/exists?utm_url=...
pub async fn utm_record_exists(
    State(state): State<AppState>,
    query: Result<Query<ExistsQuery>, QueryRejection>,
) -> ApiResult<ExistsResponse> {
    let Query(ExistsQuery { utm_url }) = query?;

    let exists = state
        .repo
        .check_utm_url_exists(&utm_url)
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Load))?;

    Ok(ApiResponse::success(ExistsResponse { utm_url, exists }))
}

/**
 * POST /api/utm-records - Store a link built from a department form
 *
 * Expected Input:
 * ```json
 * {
 *   "department": "social",
 *   "url": "https://shop.example/landing",
 *   "client": "acme",
 *   "campaign": "Spring Sale",
 *   "source": "instagram",
 *   "sourceType": "Paid Social",
 *   "identifier": "I3PS1"
 * }
 * ```
 *
 * The UTM URL is built server side. Responds 201 with the stored record, or
 * 409 when the same UTM URL is already in the sheet.
 */
pub async fn utm_record_create(
    State(state): State<AppState>,
    payload: Result<Json<UtmForm>, JsonRejection>,
) -> ApiResult<UtmRecord> {
    let Json(form) = payload?;
    let record = form.into_new_record()?;

    let stored = state
        .repo
        .add_utm_record(record)
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Save))?;

    Ok(ApiResponse::created(stored))
}

/// POST /api/utm-url - Preview the tagged URL for a form without storing it
pub async fn utm_url_preview(payload: Result<Json<UtmForm>, JsonRejection>) -> ApiResult<UtmUrlResponse> {
    let Json(form) = payload?;
    let utm_url = form.utm_url()?;

    Ok(ApiResponse::success(UtmUrlResponse { utm_url }))
}
