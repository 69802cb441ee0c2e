pub mod campaigns;
pub mod identifier;
pub mod source_types;
pub mod utm_records;

use serde::Serialize;

use crate::api::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - liveness check; does not touch Google
pub async fn health() -> ApiResponse<Health> {
    ApiResponse::success(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
