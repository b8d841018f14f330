use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

use super::MutationEngine;
use crate::database::models::{Account, AccountPatch, BoothPatch, Role};
use crate::database::{BatchOp, Collection, Patch};
use crate::error::{BoothError, BoothResult};
use crate::hierarchy::cascade::{self, ChildIndex};
use crate::services::validation;
use crate::types::Operation;

/// Requested account edits. Credentials arrive raw and are sealed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountChanges {
    pub display_name: Option<String>,
    pub credential: Option<String>,
}

/// Outcome of a cascading account delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Target first, then descendants layer by layer
    pub deleted: Vec<Uuid>,
    pub orphaned_booths: Vec<Uuid>,
}

impl MutationEngine {
    pub async fn create_account(
        &self,
        actor: &Account,
        display_name: &str,
        credential: &str,
        role: Role,
    ) -> BoothResult<Account> {
        let _guard = self.writer.lock().await;
        let actor = &self.reload_actor(actor).await?;

        if !actor.role.can_create(role) {
            warn!("{} ({}) attempted to create a {} account", actor.display_name, actor.role, role);
            return Err(BoothError::invalid_role(format!("{} cannot create {} accounts", actor.role, role)));
        }

        if self.limits.enforce_formats {
            validation::validate_account_name(&self.limits, display_name)?;
            validation::validate_passcode(&self.limits, credential)?;
        }

        self.ensure_unique_name(display_name, role, Some(actor.id), None).await?;

        let account = Account::new(display_name, self.verifier.seal(credential), role, Some(actor.id));
        let account = self.accounts.insert(account).await?;

        info!("Created {} account '{}' ({})", account.role, account.display_name, account.id);
        self.audit(Operation::Create, Collection::Accounts, actor, account.id);
        Ok(account)
    }

    pub async fn update_account(
        &self,
        actor: &Account,
        target_id: Uuid,
        changes: AccountChanges,
    ) -> BoothResult<Account> {
        let _guard = self.writer.lock().await;
        let actor = &self.reload_actor(actor).await?;

        let target = self.accounts.select_404(target_id).await?;
        self.ensure_account_in_scope(actor, target_id).await?;

        let mut patch = AccountPatch::default();

        if let Some(name) = changes.display_name {
            if name != target.display_name {
                if self.limits.enforce_formats {
                    validation::validate_account_name(&self.limits, &name)?;
                }
                self.ensure_unique_name(&name, target.role, target.created_by, Some(target.id))
                    .await?;
                patch.display_name = Some(name);
            }
        }

        if let Some(credential) = changes.credential {
            if self.limits.enforce_formats {
                validation::validate_passcode(&self.limits, &credential)?;
            }
            patch.credential = Some(self.verifier.seal(&credential));
        }

        if patch.is_empty() {
            return Ok(target);
        }

        self.accounts.update(target_id, patch).await?;
        let updated = self.accounts.select_404(target_id).await?;

        info!("Updated account '{}' ({})", updated.display_name, updated.id);
        self.audit(Operation::Update, Collection::Accounts, actor, target_id);
        Ok(updated)
    }

    /// Delete `target_id` with its whole subtree and orphan the booths
    /// assigned to any removed account, in one atomic batch.
    pub async fn delete_account(&self, actor: &Account, target_id: Uuid) -> BoothResult<CascadeReport> {
        let _guard = self.writer.lock().await;
        let actor = &self.reload_actor(actor).await?;

        let snapshot = self.store.snapshot().await?;
        if snapshot.account(target_id).is_none() {
            return Err(BoothError::not_found(format!("accounts record {}", target_id)));
        }
        self.ensure_account_in_scope(actor, target_id).await?;

        let deleted = ChildIndex::build(&snapshot.accounts).closure(target_id);
        let closure: HashSet<Uuid> = deleted.iter().copied().collect();
        let orphaned_booths: Vec<Uuid> = cascade::orphaned_by(&snapshot.booths, &closure)
            .map(|booth| booth.id)
            .collect();

        let ops = deleted
            .iter()
            .map(|&id| BatchOp::Delete { collection: Collection::Accounts, id })
            .chain(orphaned_booths.iter().map(|&id| BatchOp::Update {
                id,
                patch: Patch::Booth(BoothPatch::orphan()),
            }))
            .collect();
        self.store.batch(ops).await?;

        info!(
            "Deleted account {} with {} descendants, orphaned {} booths",
            target_id,
            deleted.len() - 1,
            orphaned_booths.len()
        );
        self.audit(Operation::Delete, Collection::Accounts, actor, target_id);
        Ok(CascadeReport { deleted, orphaned_booths })
    }

    /// Flip `active` on the target only; descendants keep their own flag
    pub async fn toggle_account_status(&self, actor: &Account, target_id: Uuid) -> BoothResult<Account> {
        let _guard = self.writer.lock().await;
        let actor = &self.reload_actor(actor).await?;

        let target = self.accounts.select_404(target_id).await?;
        self.ensure_account_in_scope(actor, target_id).await?;

        let patch = AccountPatch {
            active: Some(!target.active),
            ..Default::default()
        };
        self.accounts.update(target_id, patch).await?;
        let updated = self.accounts.select_404(target_id).await?;

        info!(
            "Account '{}' is now {}",
            updated.display_name,
            if updated.active { "active" } else { "inactive" }
        );
        self.audit(Operation::Toggle, Collection::Accounts, actor, target_id);
        Ok(updated)
    }
}
