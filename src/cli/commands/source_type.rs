use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{repository, OutputFormat};
use crate::models::NewSourceType;

#[derive(Subcommand)]
pub enum SourceTypeCommands {
    #[command(about = "List all source types")]
    List {
        #[arg(long, help = "Only show source types for this source")]
        source: Option<String>,
    },

    #[command(about = "Create a source type")]
    Add {
        #[arg(help = "Source type name, e.g. 'Paid Social'")]
        name: String,
        #[arg(long, help = "Abbreviation used in identifiers, e.g. PS")]
        abbr: String,
        #[arg(long, help = "Source the type belongs to, e.g. instagram")]
        source: String,
    },
}

pub async fn handle(cmd: SourceTypeCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let repo = repository()?;

    match cmd {
        SourceTypeCommands::List { source } => {
            let mut source_types = repo.get_source_types().await?;
            if let Some(source) = source.as_deref() {
                source_types.retain(|t| t.source.eq_ignore_ascii_case(source.trim()));
            }

            if source_types.is_empty() {
                return output_empty_collection(&output_format, "source_types", "No source types found");
            }

            output_collection(
                &output_format,
                "source_types",
                &source_types,
                &format!("{:<18} {:<15} {:<6} {}", "ID", "SOURCE", "ABBR", "NAME"),
                |t| format!("{:<18} {:<15} {:<6} {}", t.source_type_id, t.source, t.abbr, t.name),
            )
        }
        SourceTypeCommands::Add { name, abbr, source } => {
            let source_type = repo.add_source_type(NewSourceType { name, abbr, source }).await?;

            output_success(
                &output_format,
                &format!(
                    "Source type '{}' ({}) created for {} with id {}",
                    source_type.name, source_type.abbr, source_type.source, source_type.source_type_id
                ),
                Some(json!({ "source_type": source_type })),
            )
        }
    }
}
