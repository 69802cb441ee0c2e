use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{repository, OutputFormat};
use crate::models::NewCampaign;

#[derive(Subcommand)]
pub enum CampaignCommands {
    #[command(about = "List all campaigns")]
    List,

    #[command(about = "Create a campaign")]
    Add {
        #[arg(help = "Campaign name")]
        name: String,
        #[arg(long, help = "Client id the campaign belongs to")]
        client: String,
    },
}

pub async fn handle(cmd: CampaignCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let repo = repository()?;

    match cmd {
        CampaignCommands::List => {
            let campaigns = repo.get_campaigns().await?;

            if campaigns.is_empty() {
                return output_empty_collection(&output_format, "campaigns", "No campaigns found");
            }

            output_collection(
                &output_format,
                "campaigns",
                &campaigns,
                &format!("{:<18} {:<15} {}", "ID", "CLIENT", "NAME"),
                |c| format!("{:<18} {:<15} {}", c.campaign_id, c.client_id, c.name),
            )
        }
        CampaignCommands::Add { name, client } => {
            let campaign = repo
                .add_campaign(NewCampaign {
                    name,
                    client_id: client,
                })
                .await?;

            output_success(
                &output_format,
                &format!("Campaign '{}' created with id {}", campaign.name, campaign.campaign_id),
                Some(json!({ "campaign": campaign })),
            )
        }
    }
}
