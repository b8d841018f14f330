use crate::api::{dashboard, BoothSummary, Dashboard};
use crate::cli::utils::output_json;
use crate::cli::workspace::Workspace;
use crate::cli::OutputFormat;

pub async fn handle(workspace: &Workspace, output_format: OutputFormat) -> anyhow::Result<()> {
    let actor = workspace.actor().await?;
    let view = dashboard(workspace.shared(), &actor).await?;

    if let OutputFormat::Json = output_format {
        return output_json(&view);
    }

    println!("{} dashboard for {}", actor.role.label(), actor.display_name);
    println!();

    match view {
        Dashboard::Root { admins, total_booths } => {
            println!("Admins: {}    Booths in system: {}", admins.len(), total_booths);
            for admin in admins {
                let status = if admin.active { "active" } else { "inactive" };
                println!("  {:<20} {}", admin.display_name, status);
            }
        }
        Dashboard::Admin { sub_admins, booths, totals } => {
            println!(
                "Booths: {}    Votes: {}    Selected: {} ({:.1}%)",
                totals.booths, totals.votes, totals.selected, totals.percentage
            );
            println!();
            println!("Sub Admins:");
            for sub_admin in sub_admins {
                println!("  {}", sub_admin.display_name);
            }
            print_booths(&booths);
        }
        Dashboard::SubAdmin { leaves, booths } => {
            println!("{:<20} {:<8} {:<12} {}", "USER", "BOOTHS", "SELECTED", "PCT");
            for leaf in leaves {
                println!(
                    "{:<20} {:<8} {:<12} {:.1}%",
                    leaf.account.display_name,
                    leaf.votes.booths_assigned,
                    format!("{}/{}", leaf.votes.selected_total, leaf.votes.vote_total),
                    leaf.votes.percentage
                );
            }
            print_booths(&booths);
        }
        Dashboard::Leaf { booths } => print_booths(&booths),
    }
    Ok(())
}

fn print_booths(booths: &[BoothSummary]) {
    println!();
    println!("{:<25} {:<15} {:<12} {}", "BOOTH", "ASSIGNED TO", "SELECTED", "PCT");
    println!("{}", "-".repeat(65));
    for booth in booths {
        println!(
            "{:<25} {:<15} {:<12} {:.1}%",
            booth.name,
            booth.assigned_to.as_deref().unwrap_or("-"),
            format!("{}/{}", booth.selection.selected, booth.vote_count),
            booth.selection.percentage
        );
    }
}
