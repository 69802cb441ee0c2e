// handlers/identifier.rs - POST /api/identifier handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::response::{ApiResponse, ApiResult};
use crate::api::AppState;
use crate::error::{ApiError, Direction};
use crate::identifier::{count_assignments, format_identifier, resolve_source_type};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRequest {
    pub source: String,
    /// Id or name of the chosen source type
    pub source_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierResponse {
    pub identifier: String,
    pub source_count: usize,
    pub pair_count: usize,
}

/**
 * POST /api/identifier - Suggest a content tag from the links made so far
 *
 * Expected Input:
 * ```json
 * { "source": "instagram", "sourceType": "ST1709294400000" }
 * ```
 *
 * Expected Output:
 * ```json
 * { "success": true, "data": { "identifier": "I3PS1", "sourceCount": 2, "pairCount": 0 } }
 * ```
 *
 * The suggestion is not reserved; two users asking at once get the same tag.
 */
pub async fn identifier_suggest(
    State(state): State<AppState>,
    payload: Result<Json<IdentifierRequest>, JsonRejection>,
) -> ApiResult<IdentifierResponse> {
    let Json(request) = payload?;

    let source_types = state
        .repo
        .get_source_types()
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Load))?;

    let source_type = resolve_source_type(&source_types, &request.source, &request.source_type)
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "Unknown source type '{}' for source '{}'",
                request.source_type.trim(),
                request.source.trim()
            ))
        })?;

    let records = state
        .repo
        .get_utm_records()
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Load))?;

    let counts = count_assignments(&request.source, &source_type.name, &records);
    let identifier = format_identifier(&request.source, &source_type.abbr, counts)
        .ok_or_else(|| ApiError::bad_request("Source is required"))?;

    Ok(ApiResponse::success(IdentifierResponse {
        identifier,
        source_count: counts.for_source,
        pair_count: counts.for_pair,
    }))
}
