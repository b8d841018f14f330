use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::database::models::{Account, Booth, Role};
use crate::database::{EntityStore, Snapshot};
use crate::error::BoothResult;
use crate::hierarchy::{self, HierarchyResolver, Scope};
use crate::services::selection::{percentage, SelectionSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub display_name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name.clone(),
            role: account.role,
            active: account.active,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothSummary {
    pub id: Uuid,
    pub name: String,
    pub vote_count: u32,
    pub selection: SelectionSummary,
    /// Assignee display name; `None` when unassigned or orphaned
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
}

impl BoothSummary {
    fn resolve(booth: &Booth, snapshot: &Snapshot) -> Self {
        let name_of = |id: Uuid| snapshot.account(id).map(|a| a.display_name.clone());
        Self {
            id: booth.id,
            name: booth.name.clone(),
            vote_count: booth.vote_count,
            selection: SelectionSummary::of(booth),
            assigned_to: booth.assigned_to.and_then(name_of),
            created_by: name_of(booth.created_by),
        }
    }
}

/// Votes across every booth assigned to one leaf account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteOverview {
    pub booths_assigned: usize,
    pub selected_total: u64,
    pub vote_total: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafOverview {
    pub account: AccountSummary,
    pub votes: VoteOverview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub booths: usize,
    pub votes: u64,
    pub selected: u64,
    pub percentage: f64,
}

impl Totals {
    fn of<'a>(booths: impl IntoIterator<Item = &'a Booth>) -> Self {
        let (count, votes, selected) = booths.into_iter().fold((0, 0u64, 0u64), |(n, v, s), booth| {
            (n + 1, v + booth.vote_count as u64, s + booth.selected_votes.len() as u64)
        });
        Self { booths: count, votes, selected, percentage: percentage(selected, votes) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Dashboard {
    Root {
        admins: Vec<AccountSummary>,
        total_booths: usize,
    },
    Admin {
        sub_admins: Vec<AccountSummary>,
        booths: Vec<BoothSummary>,
        totals: Totals,
    },
    SubAdmin {
        leaves: Vec<LeafOverview>,
        booths: Vec<BoothSummary>,
    },
    Leaf {
        booths: Vec<BoothSummary>,
    },
}

/// Build the dashboard for `identity` from one snapshot
pub fn build(snapshot: &Snapshot, identity: &Account) -> Dashboard {
    render(snapshot, &hierarchy::resolve(snapshot, identity), identity)
}

/// Lay out an already resolved `scope`; `snapshot` must be the one it came from
pub fn render(snapshot: &Snapshot, scope: &Scope, identity: &Account) -> Dashboard {
    let summaries = |booths: &[Booth]| -> Vec<BoothSummary> {
        booths.iter().map(|b| BoothSummary::resolve(b, snapshot)).collect()
    };

    match identity.role {
        Role::Root => Dashboard::Root {
            admins: scope.accounts.iter().map(AccountSummary::from).collect(),
            total_booths: scope.booths.len(),
        },
        Role::Admin => Dashboard::Admin {
            sub_admins: scope.accounts.iter().map(AccountSummary::from).collect(),
            booths: summaries(&scope.booths),
            totals: Totals::of(&scope.booths),
        },
        Role::SubAdmin => {
            let leaves = scope
                .accounts
                .iter()
                .map(|leaf| {
                    let assigned = Totals::of(scope.booths.iter().filter(|b| b.assigned_to == Some(leaf.id)));
                    LeafOverview {
                        account: AccountSummary::from(leaf),
                        votes: VoteOverview {
                            booths_assigned: assigned.booths,
                            selected_total: assigned.selected,
                            vote_total: assigned.votes,
                            percentage: assigned.percentage,
                        },
                    }
                })
                .collect();
            Dashboard::SubAdmin { leaves, booths: summaries(&scope.booths) }
        }
        Role::Leaf => Dashboard::Leaf { booths: summaries(&scope.booths) },
    }
}

pub async fn dashboard(store: Arc<dyn EntityStore>, identity: &Account) -> BoothResult<Dashboard> {
    let (scope, snapshot) = HierarchyResolver::new(store).scope_with_snapshot(identity).await?;
    Ok(render(&snapshot, &scope, identity))
}
