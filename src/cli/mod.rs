pub mod commands;
pub mod utils;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::sheets::{self, SheetsRepository};

#[derive(Parser)]
#[command(name = "utm")]
#[command(about = "UTM desk CLI - campaigns, source types and tagged links stored in Google Sheets")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Exchange the service account key for an access token")]
    Token {
        #[arg(long, help = "Print the bearer token itself")]
        show: bool,
    },

    #[command(about = "Campaign management")]
    Campaign {
        #[command(subcommand)]
        cmd: commands::campaign::CampaignCommands,
    },

    #[command(name = "source-type", about = "Source type management")]
    SourceType {
        #[command(subcommand)]
        cmd: commands::source_type::SourceTypeCommands,
    },

    #[command(about = "Tagged link records")]
    Record {
        #[command(subcommand)]
        cmd: commands::record::RecordCommands,
    },

    #[command(about = "Suggest a content identifier for a source and source type")]
    Identifier {
        #[arg(long, help = "Source, e.g. instagram")]
        source: String,
        #[arg(long = "source-type", help = "Source type id or name")]
        source_type: String,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Process exit code for a failed command. Duplicates get their own code so
/// scripts can tell "already stored" apart from real failures.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<sheets::Error>() {
        Some(e) if e.is_duplicate() => 2,
        _ => 1,
    }
}

pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::from_env().context("failed to load configuration")
}

pub(crate) fn repository() -> anyhow::Result<SheetsRepository> {
    let config = load_config()?;
    SheetsRepository::from_config(&config).context("failed to build HTTP client")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { show } => commands::token::handle(show, output_format).await,
        Commands::Campaign { cmd } => commands::campaign::handle(cmd, output_format).await,
        Commands::SourceType { cmd } => commands::source_type::handle(cmd, output_format).await,
        Commands::Record { cmd } => commands::record::handle(cmd, output_format).await,
        Commands::Identifier { source, source_type } => {
            commands::identifier::handle(source, source_type, output_format).await
        }
    }
}
