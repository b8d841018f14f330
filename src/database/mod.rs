pub mod fixture;
pub mod memory;
pub mod models;
pub mod record;
pub mod repository;
pub mod snapshot;
pub mod store;

pub use memory::MemoryStore;
pub use record::{Collection, Entity, Patch, Record};
pub use repository::Repository;
pub use store::{BatchOp, EntityStore, Snapshot, StoreError};
