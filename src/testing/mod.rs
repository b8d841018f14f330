use std::sync::Arc;

use crate::auth::PlaintextVerifier;
use crate::config::{LimitsConfig, SecurityConfig};
use crate::database::fixture::{self, DemoFixture};
use crate::database::{EntityStore, MemoryStore};
use crate::services::{MutationEngine, SessionGate};

pub const OVERRIDE_SECRET: &str = "91111";

/// Demo data loaded into a fresh in-memory store, with engines wired to it
pub struct TestContext {
    pub demo: DemoFixture,
    pub store: MemoryStore,
    pub engine: MutationEngine,
    pub session: SessionGate,
}

impl TestContext {
    pub fn demo() -> Self {
        Self::with_security(SecurityConfig { enforce_scope: true, enable_audit_logging: true })
    }

    /// Same data set with scope checks switched off
    pub fn unhardened() -> Self {
        Self::with_security(SecurityConfig { enforce_scope: false, enable_audit_logging: false })
    }

    fn with_security(security: SecurityConfig) -> Self {
        let demo = fixture::demo();
        let store = MemoryStore::from_snapshot(demo.snapshot.clone()).expect("demo snapshot loads");
        let shared: Arc<dyn EntityStore> = Arc::new(store.clone());

        let engine = MutationEngine::new(
            Arc::clone(&shared),
            LimitsConfig::default(),
            security,
            Arc::new(PlaintextVerifier),
        );
        let session = SessionGate::new(shared, Arc::new(PlaintextVerifier), Some(OVERRIDE_SECRET.to_string()));

        Self { demo, store, engine, session }
    }
}
