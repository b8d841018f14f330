use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::workspace::Workspace;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Log in and remember the session")]
    Login {
        #[arg(help = "Account name (case-insensitive)")]
        name: String,
        #[arg(help = "Passcode")]
        passcode: String,
    },

    #[command(about = "Forget the current session")]
    Logout,

    #[command(about = "Show the logged-in account")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, workspace: &Workspace, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { name, passcode } => {
            let account = workspace.session.login(&name, &passcode).await?;
            workspace.remember(&account)?;

            output_success(
                &output_format,
                &format!("Logged in as {} ({})", account.display_name, account.role.label()),
                Some(json!({ "account_id": account.id, "role": account.role })),
            )
        }
        AuthCommands::Logout => {
            workspace.session.logout().await;
            workspace.forget()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Whoami => match workspace.session.current().await {
            Some(account) => match output_format {
                OutputFormat::Json => output_json(&json!({
                    "id": account.id,
                    "display_name": account.display_name,
                    "role": account.role,
                    "active": account.active
                })),
                OutputFormat::Text => {
                    println!("{} ({})", account.display_name, account.role.label());
                    println!("ID: {}", account.id);
                    Ok(())
                }
            },
            None => match output_format {
                OutputFormat::Json => output_json(&json!({ "account": null })),
                OutputFormat::Text => {
                    println!("Not logged in");
                    Ok(())
                }
            },
        },
    }
}
