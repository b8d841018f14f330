// Role-specific view-models handed to the presentation layer
pub mod views;

pub use views::{dashboard, AccountSummary, BoothSummary, Dashboard, LeafOverview, Totals, VoteOverview};
