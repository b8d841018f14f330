// Validated writes against the entity store
mod accounts;
mod booths;

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{verifier_for, CredentialVerifier};
use crate::config::{AppConfig, LimitsConfig, SecurityConfig};
use crate::database::models::{Account, Booth, Role};
use crate::database::{Collection, EntityStore, Repository, StoreError};
use crate::error::{BoothError, BoothResult};
use crate::filter::{Field, Filter};
use crate::hierarchy::HierarchyResolver;
use crate::types::Operation;

pub use accounts::{AccountChanges, CascadeReport};

/// Applies account and booth mutations for an authenticated actor.
///
/// Every operation takes the engine's writer lock for its whole
/// read-validate-write sequence, so checks never race the write they guard.
/// Clones share the lock.
#[derive(Clone)]
pub struct MutationEngine {
    store: Arc<dyn EntityStore>,
    accounts: Repository<Account>,
    booths: Repository<Booth>,
    resolver: HierarchyResolver,
    verifier: Arc<dyn CredentialVerifier>,
    limits: LimitsConfig,
    security: SecurityConfig,
    writer: Arc<Mutex<()>>,
}

impl MutationEngine {
    pub fn new(
        store: Arc<dyn EntityStore>,
        limits: LimitsConfig,
        security: SecurityConfig,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            accounts: Repository::new(Arc::clone(&store)),
            booths: Repository::new(Arc::clone(&store)),
            resolver: HierarchyResolver::new(Arc::clone(&store)),
            store,
            verifier,
            limits,
            security,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(store: Arc<dyn EntityStore>, config: &AppConfig) -> Self {
        Self::new(
            store,
            config.limits.clone(),
            config.security.clone(),
            verifier_for(config.session.credential_scheme),
        )
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Stored copy of `actor`. Callers hold the writer lock, so an actor
    /// removed by an earlier cascade cannot write under a stale binding.
    async fn reload_actor(&self, actor: &Account) -> BoothResult<Account> {
        match self.accounts.select_404(actor.id).await {
            Ok(current) => Ok(current),
            Err(StoreError::NotFound(_)) => {
                Err(self.refuse(actor, format!("account {} no longer exists", actor.id)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Refuse unless `target` is one of the accounts visible to `actor`
    async fn ensure_account_in_scope(&self, actor: &Account, target: Uuid) -> BoothResult<()> {
        if !self.security.enforce_scope {
            return Ok(());
        }
        let scope = self.resolver.scope(actor).await?;
        if scope.contains_account(target) {
            Ok(())
        } else {
            Err(self.refuse(actor, format!("account {} is outside the scope of {}", target, actor.display_name)))
        }
    }

    /// DuplicateName when `name` collides inside the namespace of `(role, created_by)`.
    /// Admins share one flat namespace.
    async fn ensure_unique_name(
        &self,
        name: &str,
        role: Role,
        created_by: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> BoothResult<()> {
        let filter = match role {
            Role::Admin => Filter::new().eq(Field::Role, Role::Admin),
            _ => Filter::new().eq(Field::Role, role).eq(Field::CreatedBy, created_by),
        };

        let taken = self
            .accounts
            .select_any(&filter)
            .await?
            .iter()
            .any(|existing| Some(existing.id) != exclude && existing.name_matches(name));

        if taken {
            return Err(BoothError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn refuse(&self, actor: &Account, message: String) -> BoothError {
        warn!("Refused {} ({}): {}", actor.display_name, actor.role, message);
        BoothError::out_of_scope(message)
    }

    fn audit(&self, operation: Operation, collection: Collection, actor: &Account, target: Uuid) {
        if self.security.enable_audit_logging {
            info!(
                target: "audit",
                operation = %operation,
                collection = %collection,
                actor = %actor.id,
                target_id = %target,
                "mutation applied"
            );
        }
    }
}
