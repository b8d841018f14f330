use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{Account, Booth};
use crate::database::record::{Collection, Patch, Record};
use crate::database::store::{BatchOp, EntityStore, Snapshot, StoreError};
use crate::filter::Filter;

#[derive(Debug, Clone, Default)]
struct Tables {
    accounts: BTreeMap<Uuid, Account>,
    booths: BTreeMap<Uuid, Booth>,
}

/// Inverse of one applied batch op
enum Undo {
    Remove(Collection, Uuid),
    Restore(Record),
}

impl Tables {
    fn contains(&self, collection: Collection, id: Uuid) -> bool {
        match collection {
            Collection::Accounts => self.accounts.contains_key(&id),
            Collection::Booths => self.booths.contains_key(&id),
        }
    }

    fn get(&self, collection: Collection, id: Uuid) -> Option<Record> {
        match collection {
            Collection::Accounts => self.accounts.get(&id).cloned().map(Record::Account),
            Collection::Booths => self.booths.get(&id).cloned().map(Record::Booth),
        }
    }

    fn put(&mut self, record: Record) {
        match record {
            Record::Account(account) => {
                self.accounts.insert(account.id, account);
            }
            Record::Booth(booth) => {
                self.booths.insert(booth.id, booth);
            }
        }
    }

    fn insert(&mut self, mut record: Record) -> Result<Record, StoreError> {
        if record.id().is_nil() {
            record.set_id(Uuid::new_v4());
        }
        let id = record.id();
        if self.contains(record.collection(), id) {
            return Err(StoreError::Conflict(id));
        }
        self.put(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: Uuid, patch: &Patch) -> Result<(), StoreError> {
        match patch {
            Patch::Account(patch) => self
                .accounts
                .get_mut(&id)
                .map(|account| account.apply(patch))
                .ok_or_else(|| StoreError::not_found(Collection::Accounts, id)),
            Patch::Booth(patch) => self
                .booths
                .get_mut(&id)
                .map(|booth| booth.apply(patch))
                .ok_or_else(|| StoreError::not_found(Collection::Booths, id)),
        }
    }

    fn delete(&mut self, collection: Collection, id: Uuid) -> Option<Record> {
        match collection {
            Collection::Accounts => self.accounts.remove(&id).map(Record::Account),
            Collection::Booths => self.booths.remove(&id).map(Record::Booth),
        }
    }

    /// Apply one op in place, returning how to take it back
    fn apply(&mut self, op: BatchOp) -> Result<Option<Undo>, StoreError> {
        match op {
            BatchOp::Insert(record) => {
                let stored = self.insert(record)?;
                Ok(Some(Undo::Remove(stored.collection(), stored.id())))
            }
            BatchOp::Update { id, patch } => {
                let previous = self.get(patch.collection(), id);
                self.update(id, &patch)?;
                Ok(previous.map(Undo::Restore))
            }
            BatchOp::Delete { collection, id } => Ok(self.delete(collection, id).map(Undo::Restore)),
        }
    }

    fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::Remove(collection, id) => {
                self.delete(collection, id);
            }
            Undo::Restore(record) => self.put(record),
        }
    }
}

/// In-process entity store. Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated from a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut tables = Tables::default();
        for account in snapshot.accounts {
            tables.insert(Record::Account(account))?;
        }
        for booth in snapshot.booths {
            tables.insert(Record::Booth(booth))?;
        }
        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    /// Replace the whole contents with `snapshot`
    pub async fn import(&self, snapshot: Snapshot) -> Result<(), StoreError> {
        let staged = Self::from_snapshot(snapshot)?;
        let staged = staged.tables.read().await.clone();
        *self.tables.write().await = staged;
        Ok(())
    }

    pub async fn export(&self) -> Snapshot {
        let tables = self.tables.read().await;
        Self::capture(&tables)
    }

    fn capture(tables: &Tables) -> Snapshot {
        let mut accounts: Vec<Account> = tables.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let mut booths: Vec<Booth> = tables.booths.values().cloned().collect();
        booths.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Snapshot { accounts, booths }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert(&self, record: Record) -> Result<Record, StoreError> {
        self.tables.write().await.insert(record)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, StoreError> {
        self.tables
            .read()
            .await
            .get(collection, id)
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        let records = match collection {
            Collection::Accounts => filter
                .apply(tables.accounts.values())?
                .into_iter()
                .map(Record::Account)
                .collect(),
            Collection::Booths => filter
                .apply(tables.booths.values())?
                .into_iter()
                .map(Record::Booth)
                .collect(),
        };
        Ok(records)
    }

    async fn update(&self, id: Uuid, patch: Patch) -> Result<(), StoreError> {
        self.tables.write().await.update(id, &patch)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), StoreError> {
        self.tables.write().await.delete(collection, id);
        Ok(())
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let op_count = ops.len();

        // Applied in place under the write lock; a failing op unwinds the ones before it
        let mut undo = Vec::with_capacity(op_count);
        for op in ops {
            match tables.apply(op) {
                Ok(step) => undo.extend(step),
                Err(err) => {
                    while let Some(step) = undo.pop() {
                        tables.revert(step);
                    }
                    return Err(err);
                }
            }
        }

        debug!("Applied batch of {} ops", op_count);
        Ok(())
    }

    async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let tables = self.tables.read().await;
        Ok(Self::capture(&tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{AccountPatch, BoothPatch, Role};

    fn account(name: &str) -> Account {
        Account::new(name, "12345", Role::Admin, None)
    }

    #[tokio::test]
    async fn insert_assigns_id_when_nil() {
        let store = MemoryStore::new();
        let mut record = account("alice");
        record.id = Uuid::nil();

        let stored = store.insert(Record::Account(record)).await.unwrap();
        assert!(!stored.id().is_nil());
        assert!(store.get(Collection::Accounts, stored.id()).await.is_ok());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        let record = account("alice");
        store.insert(Record::Account(record.clone())).await.unwrap();

        let err = store.insert(Record::Account(record)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update(Uuid::new_v4(), Patch::Account(AccountPatch::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn failing_batch_applies_nothing() {
        let store = MemoryStore::new();
        let alice = account("alice");
        store.insert(Record::Account(alice.clone())).await.unwrap();

        let result = store
            .batch(vec![
                BatchOp::Delete { collection: Collection::Accounts, id: alice.id },
                BatchOp::Update { id: Uuid::new_v4(), patch: Patch::Booth(BoothPatch::orphan()) },
            ])
            .await;

        assert!(result.is_err());
        assert!(store.get(Collection::Accounts, alice.id).await.is_ok());
    }

    #[tokio::test]
    async fn failing_batch_unwinds_every_kind_of_op() {
        let store = MemoryStore::new();
        let alice = account("alice");
        let bob = account("bob");
        store.insert(Record::Account(alice.clone())).await.unwrap();
        store.insert(Record::Account(bob.clone())).await.unwrap();
        let before = store.export().await;

        let deactivate = AccountPatch { active: Some(false), ..Default::default() };
        let result = store
            .batch(vec![
                BatchOp::Insert(Record::Account(account("carol"))),
                BatchOp::Update { id: alice.id, patch: Patch::Account(deactivate.clone()) },
                BatchOp::Delete { collection: Collection::Accounts, id: bob.id },
                BatchOp::Update { id: alice.id, patch: Patch::Account(deactivate) },
                BatchOp::Update { id: bob.id, patch: Patch::Account(AccountPatch::default()) },
            ])
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(store.export().await, before);
    }

    #[tokio::test]
    async fn import_replaces_contents() {
        let store = MemoryStore::new();
        store.insert(Record::Account(account("old"))).await.unwrap();

        let fresh = account("fresh");
        store
            .import(Snapshot { accounts: vec![fresh.clone()], booths: vec![] })
            .await
            .unwrap();

        let snapshot = store.export().await;
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.accounts[0].id, fresh.id);
    }
}
