use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::workspace::Workspace;
use crate::cli::OutputFormat;
use crate::services::SelectionSummary;

#[derive(Subcommand)]
pub enum BoothCommands {
    #[command(about = "List booths in scope")]
    List,

    #[command(about = "Show one booth and its selected votes")]
    Show {
        #[arg(help = "Booth ID or name")]
        booth: String,
    },

    #[command(about = "Create a booth")]
    Create {
        #[arg(help = "Booth name")]
        name: String,
        #[arg(help = "Number of votes")]
        votes: u32,
        #[arg(long, help = "Assign to a user (ID or name)")]
        assign: Option<String>,
    },

    #[command(about = "Replace the selected votes of a booth")]
    Select {
        #[arg(help = "Booth ID or name")]
        booth: String,
        #[arg(help = "Vote numbers; pass none to clear")]
        votes: Vec<u32>,
    },

    #[command(about = "Select or unselect a single vote")]
    Toggle {
        #[arg(help = "Booth ID or name")]
        booth: String,
        #[arg(help = "Vote number")]
        vote: u32,
    },
}

pub async fn handle(cmd: BoothCommands, workspace: &Workspace, output_format: OutputFormat) -> anyhow::Result<()> {
    let actor = workspace.actor().await?;
    let scope = workspace.scope(&actor).await?;

    match cmd {
        BoothCommands::List => {
            if scope.booths.is_empty() {
                return output_empty_collection(&output_format, "booths", "No booths in scope");
            }

            match output_format {
                OutputFormat::Json => {
                    let booths: Vec<_> = scope
                        .booths
                        .iter()
                        .map(|b| {
                            json!({
                                "id": b.id,
                                "name": b.name,
                                "vote_count": b.vote_count,
                                "assigned_to": b.assigned_to,
                                "selection": SelectionSummary::of(b)
                            })
                        })
                        .collect();
                    output_json(&json!({ "booths": booths }))?;
                }
                OutputFormat::Text => {
                    println!("{:<25} {:<8} {:<10} {:<8} {}", "NAME", "VOTES", "SELECTED", "PCT", "ID");
                    println!("{}", "-".repeat(95));

                    for booth in &scope.booths {
                        let summary = SelectionSummary::of(booth);
                        println!(
                            "{:<25} {:<8} {:<10} {:<8} {}",
                            booth.name,
                            booth.vote_count,
                            summary.selected,
                            format!("{:.1}%", summary.percentage),
                            booth.id
                        );
                    }
                }
            }
            Ok(())
        }
        BoothCommands::Show { booth } => {
            let booth = find_booth(&scope.booths, &booth)?;
            let summary = SelectionSummary::of(booth);

            match output_format {
                OutputFormat::Json => output_json(&json!({ "booth": booth, "selection": summary })),
                OutputFormat::Text => {
                    println!("Booth: {}", booth.name);
                    println!("ID: {}", booth.id);
                    println!(
                        "Selected: {} of {} ({:.1}%)",
                        summary.selected, booth.vote_count, summary.percentage
                    );
                    let votes: Vec<String> = booth.selected_votes.iter().map(u32::to_string).collect();
                    if !votes.is_empty() {
                        println!("Votes: {}", votes.join(", "));
                    }
                    Ok(())
                }
            }
        }
        BoothCommands::Create { name, votes, assign } => {
            let assignee = match assign {
                Some(target) => Some(find_account(&scope.accounts, &target)?.id),
                None => None,
            };

            let booth = workspace.engine.create_booth(&actor, &name, votes, assignee).await?;
            workspace.save().await?;

            output_success(
                &output_format,
                &format!("Created booth '{}' with {} votes", booth.name, booth.vote_count),
                Some(json!({ "id": booth.id })),
            )
        }
        BoothCommands::Select { booth, votes } => {
            let booth = find_booth(&scope.booths, &booth)?;
            let updated = workspace.engine.update_booth_selection(&actor, booth.id, &votes).await?;
            workspace.save().await?;

            let summary = SelectionSummary::of(&updated);
            output_success(
                &output_format,
                &format!("{}: {} of {} votes selected", updated.name, summary.selected, updated.vote_count),
                Some(json!({ "id": updated.id, "selected_votes": updated.selected_votes })),
            )
        }
        BoothCommands::Toggle { booth, vote } => {
            let booth = find_booth(&scope.booths, &booth)?;
            let updated = workspace.engine.toggle_vote(&actor, booth.id, vote).await?;
            workspace.save().await?;

            let state = if updated.selected_votes.contains(&vote) { "selected" } else { "unselected" };
            output_success(
                &output_format,
                &format!("{}: vote {} {}", updated.name, vote, state),
                Some(json!({ "id": updated.id, "vote": vote, "selected": state == "selected" })),
            )
        }
    }
}
