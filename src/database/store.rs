use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Account, Booth};
use crate::database::record::{Collection, Patch, Record};
use crate::filter::{Filter, FilterError};

/// Errors raised by an entity store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    Conflict(Uuid),

    #[error("Collection mismatch: expected {expected}, got {actual}")]
    CollectionMismatch { expected: Collection, actual: Collection },

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Format(String),
}

impl StoreError {
    pub fn not_found(collection: Collection, id: Uuid) -> Self {
        StoreError::NotFound(format!("{} record {}", collection, id))
    }
}

/// One write inside an atomic `batch`
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Insert(Record),
    Update { id: Uuid, patch: Patch },
    Delete { collection: Collection, id: Uuid },
}

/// Whole-store contents captured under a single read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub booths: Vec<Booth>,
}

impl Snapshot {
    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn booth(&self, id: Uuid) -> Option<&Booth> {
        self.booths.iter().find(|b| b.id == id)
    }
}

/// Persistence collaborator consumed by the core.
///
/// Implementations must make `batch` all-or-nothing and must serve
/// `snapshot` from one consistent view of both collections.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Insert a record, assigning a fresh id when the record's id is nil
    async fn insert(&self, record: Record) -> Result<Record, StoreError>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, StoreError>;

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError>;

    /// Merge `patch` into the record; fails `NotFound` when absent
    async fn update(&self, id: Uuid, patch: Patch) -> Result<(), StoreError>;

    /// Remove a record; removing an absent id is a no-op
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), StoreError>;

    /// Apply every op or none of them
    async fn batch(&self, ops: Vec<BatchOp>) -> Result<(), StoreError>;

    async fn snapshot(&self) -> Result<Snapshot, StoreError>;
}
