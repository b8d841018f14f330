use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::auth::verifier_for;
use crate::cli::config::{clear_session, DataPaths};
use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::fixture;
use crate::database::models::{Account, Role};
use crate::database::{snapshot, Snapshot};

#[derive(Args)]
pub struct InitArgs {
    #[arg(long, help = "Seed the demo hierarchy and booths")]
    pub demo: bool,

    #[arg(long, default_value = "Super-Admin", help = "Root account name")]
    pub root_name: String,

    #[arg(long, help = "Root account passcode (required without --demo)")]
    pub root_passcode: Option<String>,

    #[arg(long, help = "Overwrite an existing data file")]
    pub force: bool,
}

pub async fn handle(
    args: InitArgs,
    config: &AppConfig,
    data: Option<PathBuf>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let paths = DataPaths::resolve(&config.storage, data);

    if paths.snapshot.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Data file {} already exists (use --force to overwrite)",
            paths.snapshot.display()
        ));
    }

    let verifier = verifier_for(config.session.credential_scheme);
    let seeded = if args.demo {
        fixture::demo_sealed(verifier.as_ref()).snapshot
    } else {
        let passcode = args
            .root_passcode
            .ok_or_else(|| anyhow::anyhow!("--root-passcode is required unless --demo is given"))?;
        let root = Account::new(args.root_name, verifier.seal(&passcode), Role::Root, None);
        Snapshot { accounts: vec![root], booths: vec![] }
    };

    snapshot::save(&paths.snapshot, &seeded)?;
    clear_session(&paths.session)?;

    output_success(
        &output_format,
        &format!("Initialized {}", paths.snapshot.display()),
        Some(json!({
            "path": paths.snapshot,
            "accounts": seeded.accounts.len(),
            "booths": seeded.booths.len()
        })),
    )
}
