use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::workspace::Workspace;
use crate::cli::OutputFormat;
use crate::error::BoothError;
use crate::services::AccountChanges;

#[derive(Subcommand)]
pub enum AccountCommands {
    #[command(about = "List accounts you manage")]
    List,

    #[command(about = "Create an account one level below yours")]
    Create {
        #[arg(help = "Account name")]
        name: String,
        #[arg(help = "Passcode")]
        passcode: String,
    },

    #[command(about = "Rename an account or reset its passcode")]
    Update {
        #[arg(help = "Account ID or name")]
        target: String,
        #[arg(long, help = "New account name")]
        name: Option<String>,
        #[arg(long, help = "New passcode")]
        passcode: Option<String>,
    },

    #[command(about = "Delete an account and everything it created")]
    Delete {
        #[arg(help = "Account ID or name")]
        target: String,
    },

    #[command(about = "Activate or deactivate an account")]
    Toggle {
        #[arg(help = "Account ID or name")]
        target: String,
    },
}

pub async fn handle(cmd: AccountCommands, workspace: &Workspace, output_format: OutputFormat) -> anyhow::Result<()> {
    let actor = workspace.actor().await?;
    let scope = workspace.scope(&actor).await?;

    match cmd {
        AccountCommands::List => {
            if scope.accounts.is_empty() {
                return output_empty_collection(&output_format, "accounts", "No accounts in scope");
            }

            match output_format {
                OutputFormat::Json => {
                    let accounts: Vec<_> = scope
                        .accounts
                        .iter()
                        .map(|a| {
                            json!({
                                "id": a.id,
                                "display_name": a.display_name,
                                "role": a.role,
                                "active": a.active,
                                "created_at": a.created_at
                            })
                        })
                        .collect();
                    output_json(&json!({ "accounts": accounts }))?;
                }
                OutputFormat::Text => {
                    println!("{:<20} {:<12} {:<10} {:<20} {}", "NAME", "ROLE", "STATUS", "CREATED", "ID");
                    println!("{}", "-".repeat(100));

                    for account in &scope.accounts {
                        let status = if account.active { "active" } else { "inactive" };
                        let created = account.created_at.format("%Y-%m-%d %H:%M").to_string();
                        println!(
                            "{:<20} {:<12} {:<10} {:<20} {}",
                            account.display_name,
                            account.role.label(),
                            status,
                            created,
                            account.id
                        );
                    }
                }
            }
            Ok(())
        }
        AccountCommands::Create { name, passcode } => {
            let role = actor
                .role
                .child()
                .ok_or_else(|| BoothError::invalid_role(format!("{} cannot create accounts", actor.role)))?;

            let account = workspace.engine.create_account(&actor, &name, &passcode, role).await?;
            workspace.save().await?;

            output_success(
                &output_format,
                &format!("Created {} '{}'", account.role.label(), account.display_name),
                Some(json!({ "id": account.id, "role": account.role })),
            )
        }
        AccountCommands::Update { target, name, passcode } => {
            if name.is_none() && passcode.is_none() {
                return Err(anyhow::anyhow!("Nothing to update: pass --name and/or --passcode"));
            }

            let target = find_account(&scope.accounts, &target)?;
            let changes = AccountChanges { display_name: name, credential: passcode };
            let account = workspace.engine.update_account(&actor, target.id, changes).await?;
            workspace.save().await?;

            output_success(
                &output_format,
                &format!("Updated '{}'", account.display_name),
                Some(json!({ "id": account.id })),
            )
        }
        AccountCommands::Delete { target } => {
            let target = find_account(&scope.accounts, &target)?;
            let report = workspace.engine.delete_account(&actor, target.id).await?;
            workspace.save().await?;

            output_success(
                &output_format,
                &format!(
                    "Deleted '{}' and {} descendant account(s); {} booth(s) unassigned",
                    target.display_name,
                    report.deleted.len() - 1,
                    report.orphaned_booths.len()
                ),
                Some(json!({
                    "deleted": report.deleted,
                    "orphaned_booths": report.orphaned_booths
                })),
            )
        }
        AccountCommands::Toggle { target } => {
            let target = find_account(&scope.accounts, &target)?;
            let account = workspace.engine.toggle_account_status(&actor, target.id).await?;
            workspace.save().await?;

            let status = if account.active { "activated" } else { "deactivated" };
            output_success(
                &output_format,
                &format!("'{}' {}", account.display_name, status),
                Some(json!({ "id": account.id, "active": account.active })),
            )
        }
    }
}
