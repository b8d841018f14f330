use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A named collection of vote slots numbered `1..=vote_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booth {
    pub id: Uuid,
    pub name: String,
    pub vote_count: u32,
    /// Leaf account the booth is assigned to; `None` when unassigned or orphaned
    pub assigned_to: Option<Uuid>,
    /// SubAdmin account that created the booth
    pub created_by: Uuid,
    pub selected_votes: BTreeSet<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booth {
    pub fn new(
        name: impl Into<String>,
        vote_count: u32,
        assigned_to: Option<Uuid>,
        created_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            vote_count,
            assigned_to,
            created_by,
            selected_votes: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains_vote(&self, vote: u32) -> bool {
        (1..=self.vote_count).contains(&vote)
    }

    pub fn apply(&mut self, patch: &BoothPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(votes) = &patch.selected_votes {
            self.selected_votes = votes.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Partial booth update. `assigned_to: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoothPatch {
    pub name: Option<String>,
    pub assigned_to: Option<Option<Uuid>>,
    pub selected_votes: Option<BTreeSet<u32>>,
}

impl BoothPatch {
    /// Patch that orphans a booth
    pub fn orphan() -> Self {
        Self {
            assigned_to: Some(None),
            ..Default::default()
        }
    }

    pub fn selection(votes: BTreeSet<u32>) -> Self {
        Self {
            selected_votes: Some(votes),
            ..Default::default()
        }
    }
}
