// handlers/source_types.rs - /api/source-types handlers

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::api::response::{ApiResponse, ApiResult};
use crate::api::AppState;
use crate::error::{ApiError, Direction};
use crate::models::{NewSourceType, SourceType};

pub async fn source_type_list(State(state): State<AppState>) -> ApiResult<Vec<SourceType>> {
    let source_types = state
        .repo
        .get_source_types()
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Load))?;

    Ok(ApiResponse::success(source_types))
}

/**
 * POST /api/source-types - Register a source type for a source
 *
 * Expected Input:
 * ```json
 * { "name": "Paid Social", "abbr": "PS", "source": "instagram" }
 * ```
 */
pub async fn source_type_create(
    State(state): State<AppState>,
    payload: Result<Json<NewSourceType>, JsonRejection>,
) -> ApiResult<SourceType> {
    let Json(source_type) = payload?;

    let missing: Vec<&str> = [
        ("name", &source_type.name),
        ("abbr", &source_type.abbr),
        ("source", &source_type.source),
    ]
    .iter()
    .filter(|(_, v)| v.trim().is_empty())
    .map(|(k, _)| *k)
    .collect();

    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let source_type = state
        .repo
        .add_source_type(source_type)
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Save))?;

    Ok(ApiResponse::created(source_type))
}
