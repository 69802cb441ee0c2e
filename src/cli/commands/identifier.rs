use anyhow::Context;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{repository, OutputFormat};
use crate::identifier::{count_assignments, format_identifier, resolve_source_type};

pub async fn handle(source: String, source_type: String, output_format: OutputFormat) -> anyhow::Result<()> {
    let repo = repository()?;

    let source_types = repo.get_source_types().await?;
    let chosen = resolve_source_type(&source_types, &source, &source_type)
        .with_context(|| format!("unknown source type '{}' for source '{}'", source_type.trim(), source.trim()))?;

    let records = repo.get_utm_records().await?;
    let counts = count_assignments(&source, &chosen.name, &records);
    let identifier = format_identifier(&source, &chosen.abbr, counts).context("source is empty")?;

    output_success(
        &output_format,
        &identifier,
        Some(json!({
            "identifier": identifier,
            "source_count": counts.for_source,
            "pair_count": counts.for_pair,
        })),
    )
}
