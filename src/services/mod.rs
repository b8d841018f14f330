pub mod mutation;
pub mod selection;
pub mod session;
pub mod validation;

pub use mutation::{AccountChanges, CascadeReport, MutationEngine};
pub use selection::SelectionSummary;
pub use session::{SessionGate, SessionState};
