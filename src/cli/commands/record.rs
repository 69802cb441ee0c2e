use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{repository, OutputFormat};
use crate::form::{FormAction, UtmForm};
use crate::identifier::resolve_source_type;
use crate::models::Department;

#[derive(Subcommand)]
pub enum RecordCommands {
    #[command(about = "List stored UTM records")]
    List {
        #[arg(long, help = "Only show records for this department")]
        department: Option<String>,
    },

    #[command(about = "Check whether a UTM URL is already stored")]
    Exists {
        #[arg(help = "Full tagged URL")]
        utm_url: String,
    },

    #[command(about = "Build a tagged URL and store it")]
    Add {
        #[arg(long, default_value = "marketing", help = "marketing, sales, social or affiliates")]
        department: String,
        #[arg(long, help = "Destination URL")]
        url: String,
        #[arg(long, help = "Client id")]
        client: String,
        #[arg(long, help = "Campaign name")]
        campaign: String,
        #[arg(long, help = "Source, e.g. instagram")]
        source: String,
        #[arg(long = "source-type", help = "Source type name")]
        source_type: String,
        #[arg(long, help = "Content identifier (suggested from existing records when omitted)")]
        identifier: Option<String>,
        #[arg(long, help = "Optional utm_term")]
        term: Option<String>,
        #[arg(long, help = "Print the tagged URL without storing it")]
        dry_run: bool,
    },
}

pub async fn handle(cmd: RecordCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let repo = repository()?;

    match cmd {
        RecordCommands::List { department } => {
            let mut records = repo.get_utm_records().await?;
            if let Some(department) = department.as_deref() {
                let department = Department::from_cell(department);
                records.retain(|r| r.department == department);
            }

            if records.is_empty() {
                return output_empty_collection(&output_format, "utm_records", "No UTM records found");
            }

            output_collection(
                &output_format,
                "utm_records",
                &records,
                &format!("{:<8} {:<11} {:<10} {}", "ID", "DEPARTMENT", "TAG", "UTM URL"),
                |r| format!("{:<8} {:<11} {:<10} {}", r.utm_id, r.department, r.identifier, r.utm_url),
            )
        }
        RecordCommands::Exists { utm_url } => {
            let exists = repo.check_utm_url_exists(&utm_url).await?;
            let message = if exists {
                format!("{} is already stored", utm_url)
            } else {
                format!("{} is not stored yet", utm_url)
            };

            output_success(
                &output_format,
                &message,
                Some(json!({ "utm_url": utm_url, "exists": exists })),
            )
        }
        RecordCommands::Add {
            department,
            url,
            client,
            campaign,
            source,
            source_type,
            identifier,
            term,
            dry_run,
        } => {
            let department: Department = department.parse().map_err(anyhow::Error::msg)?;

            let mut form = [
                FormAction::SetUrl(url),
                FormAction::SetClient(client),
                FormAction::SetCampaign(campaign),
                FormAction::SetSource(source),
                FormAction::SetSourceType(source_type),
                FormAction::SetTerm(term),
            ]
            .into_iter()
            .fold(UtmForm::new(department), UtmForm::reduce);

            form = match identifier {
                Some(identifier) => form.reduce(FormAction::SetIdentifier(identifier)),
                None => {
                    let source_types = repo.get_source_types().await?;
                    let chosen = resolve_source_type(&source_types, &form.source, &form.source_type)
                        .with_context(|| {
                            format!(
                                "no source type '{}' for source '{}'; pass --identifier",
                                form.source_type, form.source
                            )
                        })?;
                    let records = repo.get_utm_records().await?;
                    form.with_suggested_identifier(chosen, &records)
                }
            };

            let record = form.into_new_record()?;

            if dry_run {
                return output_success(
                    &output_format,
                    &record.utm_url,
                    Some(json!({ "utm_url": record.utm_url, "identifier": record.identifier })),
                );
            }

            let stored = repo.add_utm_record(record).await?;

            output_success(
                &output_format,
                &format!("Stored {} as {}", stored.utm_url, stored.identifier),
                Some(json!({ "utm_record": stored })),
            )
        }
    }
}
