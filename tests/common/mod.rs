#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use boothverse::auth::{CredentialVerifier, PlaintextVerifier};
use boothverse::config::{LimitsConfig, SecurityConfig};
use boothverse::database::fixture::{self, DemoFixture};
use boothverse::database::{BatchOp, Collection, EntityStore, MemoryStore, Patch, Record, Snapshot, StoreError};
use boothverse::filter::Filter;
use boothverse::services::{MutationEngine, SessionGate};

pub const OVERRIDE_SECRET: &str = "91111";

/// Demo data in a fresh memory store with engines wired to it
pub struct Harness {
    pub demo: DemoFixture,
    pub store: MemoryStore,
    pub shared: Arc<dyn EntityStore>,
    pub engine: MutationEngine,
    pub session: SessionGate,
}

impl Harness {
    pub fn hardened() -> Result<Self> {
        Self::with_security(SecurityConfig { enforce_scope: true, enable_audit_logging: true })
    }

    pub fn unhardened() -> Result<Self> {
        Self::with_security(SecurityConfig { enforce_scope: false, enable_audit_logging: false })
    }

    pub fn with_security(security: SecurityConfig) -> Result<Self> {
        let demo = fixture::demo();
        let store = MemoryStore::from_snapshot(demo.snapshot.clone())?;
        let shared: Arc<dyn EntityStore> = Arc::new(store.clone());
        let (engine, session) = engines(Arc::clone(&shared), security, Arc::new(PlaintextVerifier));
        Ok(Self { demo, store, shared, engine, session })
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.shared.snapshot().await?)
    }
}

pub fn engines(
    store: Arc<dyn EntityStore>,
    security: SecurityConfig,
    verifier: Arc<dyn CredentialVerifier>,
) -> (MutationEngine, SessionGate) {
    let engine = MutationEngine::new(Arc::clone(&store), LimitsConfig::default(), security, Arc::clone(&verifier));
    let session = SessionGate::new(store, verifier, Some(OVERRIDE_SECRET.to_string()));
    (engine, session)
}

/// Store whose every call fails, for collaborator-failure paths
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl EntityStore for FailingStore {
    async fn insert(&self, _record: Record) -> Result<Record, StoreError> {
        Err(down())
    }

    async fn get(&self, _collection: Collection, _id: Uuid) -> Result<Record, StoreError> {
        Err(down())
    }

    async fn query(&self, _collection: Collection, _filter: &Filter) -> Result<Vec<Record>, StoreError> {
        Err(down())
    }

    async fn update(&self, _id: Uuid, _patch: Patch) -> Result<(), StoreError> {
        Err(down())
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> Result<(), StoreError> {
        Err(down())
    }

    async fn batch(&self, _ops: Vec<BatchOp>) -> Result<(), StoreError> {
        Err(down())
    }

    async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Err(down())
    }
}

/// Memory store that serves reads but refuses batches
pub struct BatchlessStore(pub MemoryStore);

#[async_trait]
impl EntityStore for BatchlessStore {
    async fn insert(&self, record: Record) -> Result<Record, StoreError> {
        self.0.insert(record).await
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, StoreError> {
        self.0.get(collection, id).await
    }

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        self.0.query(collection, filter).await
    }

    async fn update(&self, id: Uuid, patch: Patch) -> Result<(), StoreError> {
        self.0.update(id, patch).await
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), StoreError> {
        self.0.delete(collection, id).await
    }

    async fn batch(&self, _ops: Vec<BatchOp>) -> Result<(), StoreError> {
        Err(down())
    }

    async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.0.snapshot().await
    }
}

/// Memory store whose queries wait while `gate` is write-locked.
/// `entered` is signalled as each query arrives.
pub struct GatedStore {
    pub inner: MemoryStore,
    pub gate: Arc<tokio::sync::RwLock<()>>,
    pub entered: tokio::sync::Notify,
}

impl GatedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self { inner, gate: Arc::new(tokio::sync::RwLock::new(())), entered: tokio::sync::Notify::new() }
    }
}

#[async_trait]
impl EntityStore for GatedStore {
    async fn insert(&self, record: Record) -> Result<Record, StoreError> {
        self.inner.insert(record).await
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Record, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        self.entered.notify_one();
        let _open = self.gate.read().await;
        self.inner.query(collection, filter).await
    }

    async fn update(&self, id: Uuid, patch: Patch) -> Result<(), StoreError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(collection, id).await
    }

    async fn batch(&self, ops: Vec<BatchOp>) -> Result<(), StoreError> {
        self.inner.batch(ops).await
    }

    async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.inner.snapshot().await
    }
}
