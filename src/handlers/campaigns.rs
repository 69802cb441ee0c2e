// handlers/campaigns.rs - /api/campaigns handlers

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::api::response::{ApiResponse, ApiResult};
use crate::api::AppState;
use crate::error::{ApiError, Direction};
use crate::models::{Campaign, NewCampaign};

/**
 * GET /api/campaigns - List every campaign in the Campaigns sheet
 *
 * Re-reads the sheet on every call.
 */
pub async fn campaign_list(State(state): State<AppState>) -> ApiResult<Vec<Campaign>> {
    let campaigns = state
        .repo
        .get_campaigns()
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Load))?;

    Ok(ApiResponse::success(campaigns))
}

/**
 * POST /api/campaigns - Create a campaign for a client
 *
 * Expected Input:
 * ```json
 * { "name": "Spring Sale", "clientId": "c1" }
 * ```
 *
 * Responds 201 with the stored campaign, including its `C<millis>` id.
 */
pub async fn campaign_create(
    State(state): State<AppState>,
    payload: Result<Json<NewCampaign>, JsonRejection>,
) -> ApiResult<Campaign> {
    let Json(campaign) = payload?;

    if campaign.name.trim().is_empty() {
        return Err(ApiError::bad_request("Campaign name is required"));
    }
    if campaign.client_id.trim().is_empty() {
        return Err(ApiError::bad_request("Campaign clientId is required"));
    }

    let campaign = state
        .repo
        .add_campaign(campaign)
        .await
        .map_err(|e| ApiError::from_sheets(e, Direction::Save))?;

    Ok(ApiResponse::created(campaign))
}
