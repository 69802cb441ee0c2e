use serde_json::json;

use crate::auth::TokenIssuer;
use crate::cli::utils::output_success;
use crate::cli::{load_config, OutputFormat};
use crate::sheets::build_http_client;

pub async fn handle(show: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config()?;
    let http = build_http_client(config.sheets.request_timeout_secs)?;
    let issuer = TokenIssuer::new(http, config.google.clone());

    let token = issuer.get_access_token().await?;

    let mut data = json!({
        "service_account": config.google.client_email,
        "issued_at": token.issued_at,
        "expires_at": token.expires_at,
    });
    if show {
        data["access_token"] = json!(token.token);
    }

    output_success(
        &output_format,
        &format!("Access token valid until {}", token.expires_at.format("%Y-%m-%d %H:%M:%S UTC")),
        Some(data),
    )?;

    if show && matches!(output_format, OutputFormat::Text) {
        println!("{}", token.token);
    }

    Ok(())
}
