use tracing::info;
use uuid::Uuid;

use super::MutationEngine;
use crate::database::models::{Account, Booth, BoothPatch, Role};
use crate::database::Collection;
use crate::error::{BoothError, BoothResult};
use crate::services::{selection, validation};
use crate::types::Operation;

impl MutationEngine {
    pub async fn create_booth(
        &self,
        actor: &Account,
        name: &str,
        vote_count: u32,
        assigned_to: Option<Uuid>,
    ) -> BoothResult<Booth> {
        let _guard = self.writer.lock().await;
        let actor = &self.reload_actor(actor).await?;

        if self.security.enforce_scope && actor.role != Role::SubAdmin {
            return Err(BoothError::invalid_role(format!("{} cannot create booths", actor.role)));
        }

        if self.limits.enforce_formats {
            validation::validate_booth_name(&self.limits, name)?;
        }
        validation::validate_vote_count(&self.limits, vote_count)?;

        if let Some(assignee_id) = assigned_to {
            self.check_assignee(actor, assignee_id).await?;
        }

        let booth = Booth::new(name.trim(), vote_count, assigned_to, actor.id);
        let booth = self.booths.insert(booth).await?;

        info!("Created booth '{}' with {} votes ({})", booth.name, booth.vote_count, booth.id);
        self.audit(Operation::Create, Collection::Booths, actor, booth.id);
        Ok(booth)
    }

    /// Replace the booth's whole selection with `votes`
    pub async fn update_booth_selection(&self, actor: &Account, booth_id: Uuid, votes: &[u32]) -> BoothResult<Booth> {
        let _guard = self.writer.lock().await;

        let booth = self.booths.select_404(booth_id).await?;
        self.replace_selection(actor, booth, votes).await
    }

    /// Flip one vote number and submit the resulting full set
    pub async fn toggle_vote(&self, actor: &Account, booth_id: Uuid, vote: u32) -> BoothResult<Booth> {
        let _guard = self.writer.lock().await;

        let booth = self.booths.select_404(booth_id).await?;
        let next = selection::toggled(&booth.selected_votes, vote);
        self.replace_selection(actor, booth, &next).await
    }

    // Caller holds the writer lock
    async fn replace_selection(&self, actor: &Account, booth: Booth, votes: &[u32]) -> BoothResult<Booth> {
        let actor = &self.reload_actor(actor).await?;
        if self.security.enforce_scope && booth.assigned_to != Some(actor.id) {
            return Err(self.refuse(actor, format!("booth {} is not assigned to {}", booth.id, actor.display_name)));
        }

        let selected = selection::normalize_votes(booth.vote_count, votes)?;
        let count = selected.len();
        self.booths.update(booth.id, BoothPatch::selection(selected)).await?;
        let updated = self.booths.select_404(booth.id).await?;

        info!("Booth '{}' selection replaced: {} of {} votes", updated.name, count, updated.vote_count);
        self.audit(Operation::Update, Collection::Booths, actor, booth.id);
        Ok(updated)
    }

    async fn check_assignee(&self, actor: &Account, assignee_id: Uuid) -> BoothResult<()> {
        let assignee = self.accounts.select_404(assignee_id).await?;

        if assignee.role != Role::Leaf {
            return Err(BoothError::invalid_role(format!(
                "booths can only be assigned to leaf accounts, '{}' is {}",
                assignee.display_name, assignee.role
            )));
        }

        if self.security.enforce_scope && assignee.created_by != Some(actor.id) {
            return Err(self.refuse(
                actor,
                format!("'{}' was not created by {}", assignee.display_name, actor.display_name),
            ));
        }
        Ok(())
    }
}
