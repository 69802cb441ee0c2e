use anyhow::Context;
use tracing_subscriber::EnvFilter;

use utm_desk::api::{self, AppState};
use utm_desk::config::AppConfig;
use utm_desk::sheets::SheetsRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up the Google credentials
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("utm_desk=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    tracing::info!(
        "Starting UTM desk in {:?} mode (token cache: {}, timeout: {}s)",
        config.environment,
        config.sheets.cache_tokens,
        config.sheets.request_timeout_secs
    );

    let repo = SheetsRepository::from_config(&config).context("failed to build HTTP client")?;
    let app = api::app(AppState::new(repo));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("UTM desk listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
