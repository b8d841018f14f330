pub mod commands;
pub mod config;
pub mod utils;
pub mod workspace;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::AppConfig;
use workspace::Workspace;

#[derive(Parser)]
#[command(name = "boothverse")]
#[command(about = "Boothverse - hierarchical voting booth administration")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Snapshot file to use instead of the configured data dir")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create a fresh data file")]
    Init(commands::init::InitArgs),

    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Manage the accounts you created")]
    Account {
        #[command(subcommand)]
        cmd: commands::account::AccountCommands,
    },

    #[command(about = "Manage booths and vote selections")]
    Booth {
        #[command(subcommand)]
        cmd: commands::booth::BoothCommands,
    },

    #[command(about = "Show the dashboard for the logged-in role")]
    Dashboard,
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

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let data = cli.data;

    match cli.command {
        Commands::Init(args) => commands::init::handle(args, config, data, output_format).await,
        Commands::Auth { cmd } => {
            let workspace = Workspace::open(config, data).await?;
            commands::auth::handle(cmd, &workspace, output_format).await
        }
        Commands::Account { cmd } => {
            let workspace = Workspace::open(config, data).await?;
            commands::account::handle(cmd, &workspace, output_format).await
        }
        Commands::Booth { cmd } => {
            let workspace = Workspace::open(config, data).await?;
            commands::booth::handle(cmd, &workspace, output_format).await
        }
        Commands::Dashboard => {
            let workspace = Workspace::open(config, data).await?;
            commands::dashboard::handle(&workspace, output_format).await
        }
    }
}
