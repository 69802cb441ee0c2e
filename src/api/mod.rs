pub mod response;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::sheets::SheetsRepository;

/// Shared by every handler; the repository holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<SheetsRepository>,
}

impl AppState {
    pub fn new(repo: SheetsRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Data access
        .merge(campaign_routes())
        .merge(source_type_routes())
        .merge(utm_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn campaign_routes() -> Router<AppState> {
    use handlers::campaigns;

    Router::new().route(
        "/api/campaigns",
        get(campaigns::campaign_list).post(campaigns::campaign_create),
    )
}

fn source_type_routes() -> Router<AppState> {
    use handlers::source_types;

    Router::new().route(
        "/api/source-types",
        get(source_types::source_type_list).post(source_types::source_type_create),
    )
}

fn utm_routes() -> Router<AppState> {
    use handlers::{identifier, utm_records};

    Router::new()
        .route(
            "/api/utm-records",
            get(utm_records::utm_record_list).post(utm_records::utm_record_create),
        )
        .route("/api/utm-records/exists", get(utm_records::utm_record_exists))
        .route("/api/utm-url", post(utm_records::utm_url_preview))
        .route("/api/identifier", post(identifier::identifier_suggest))
}
