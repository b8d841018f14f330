use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::database::models::Booth;
use crate::error::{BoothError, BoothResult};

/// Validate a requested full selection against `[1, vote_count]`.
///
/// The first out-of-range number rejects the whole request; duplicates
/// collapse into the returned set.
pub fn normalize_votes(vote_count: u32, votes: &[u32]) -> BoothResult<BTreeSet<u32>> {
    if let Some(&bad) = votes.iter().find(|&&v| v == 0 || v > vote_count) {
        return Err(BoothError::out_of_range("votes", bad as u64, 1, vote_count as u64));
    }
    Ok(votes.iter().copied().collect())
}

/// Current selection with `vote` flipped
pub fn toggled(selection: &BTreeSet<u32>, vote: u32) -> Vec<u32> {
    let mut next = selection.clone();
    if !next.remove(&vote) {
        next.insert(vote);
    }
    next.into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub selected: usize,
    pub vote_count: u32,
    pub percentage: f64,
}

impl SelectionSummary {
    pub fn of(booth: &Booth) -> Self {
        Self::from_totals(booth.selected_votes.len(), booth.vote_count as u64)
    }

    pub fn from_totals(selected: usize, total: u64) -> Self {
        Self {
            selected,
            vote_count: total.min(u32::MAX as u64) as u32,
            percentage: percentage(selected as u64, total),
        }
    }
}

pub fn percentage(selected: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        selected as f64 / total as f64 * 100.0
    }
}
