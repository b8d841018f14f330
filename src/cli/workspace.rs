use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::cli::config::{clear_session, load_session, save_session, DataPaths, SessionFile};
use crate::config::AppConfig;
use crate::database::models::Account;
use crate::database::{snapshot, EntityStore, MemoryStore};
use crate::hierarchy::{HierarchyResolver, Scope};
use crate::services::{MutationEngine, SessionGate};

/// One CLI invocation's view of the persisted state: the snapshot loaded
/// into a memory store, engines wired to it and the resumed session.
pub struct Workspace {
    pub paths: DataPaths,
    pub store: MemoryStore,
    pub engine: MutationEngine,
    pub session: SessionGate,
    pub resolver: HierarchyResolver,
}

impl Workspace {
    pub async fn open(config: &AppConfig, data: Option<PathBuf>) -> anyhow::Result<Self> {
        let paths = DataPaths::resolve(&config.storage, data);
        let store = MemoryStore::from_snapshot(snapshot::load(&paths.snapshot)?)?;
        let shared: Arc<dyn EntityStore> = Arc::new(store.clone());

        let workspace = Self {
            engine: MutationEngine::from_config(Arc::clone(&shared), config),
            session: SessionGate::from_config(Arc::clone(&shared), &config.session),
            resolver: HierarchyResolver::new(shared),
            store,
            paths,
        };

        if let Some(saved) = load_session(&workspace.paths.session)? {
            if let Err(e) = workspace.session.resume(saved.account_id).await {
                warn!("Dropping saved session for '{}': {}", saved.display_name, e);
                clear_session(&workspace.paths.session)?;
            }
        }

        Ok(workspace)
    }

    pub fn shared(&self) -> Arc<dyn EntityStore> {
        Arc::new(self.store.clone())
    }

    /// The logged-in account, or an error telling the user to log in
    pub async fn actor(&self) -> anyhow::Result<Account> {
        self.session
            .require()
            .await
            .map_err(|_| anyhow::anyhow!("Not logged in. Run 'boothverse auth login <name> <passcode>' first"))
    }

    pub async fn scope(&self, actor: &Account) -> anyhow::Result<Scope> {
        Ok(self.resolver.scope(actor).await?)
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        snapshot::save(&self.paths.snapshot, &self.store.export().await)?;
        Ok(())
    }

    pub fn remember(&self, account: &Account) -> anyhow::Result<()> {
        save_session(&self.paths.session, &SessionFile::new(account.id, account.display_name.clone()))
    }

    pub fn forget(&self) -> anyhow::Result<()> {
        clear_session(&self.paths.session)
    }
}
