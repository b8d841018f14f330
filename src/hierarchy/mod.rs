pub mod cascade;

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{Account, Booth, Role};
use crate::database::{EntityStore, Snapshot};
use crate::error::BoothResult;

pub use cascade::ChildIndex;

/// Accounts and booths visible to one identity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    pub accounts: Vec<Account>,
    pub booths: Vec<Booth>,
}

impl Scope {
    pub fn contains_account(&self, id: Uuid) -> bool {
        self.accounts.iter().any(|a| a.id == id)
    }

    pub fn contains_booth(&self, id: Uuid) -> bool {
        self.booths.iter().any(|b| b.id == id)
    }
}

/// Visibility rules, evaluated against a single snapshot:
///
/// | role     | accounts                      | booths                                   |
/// |----------|-------------------------------|------------------------------------------|
/// | Root     | every Admin                   | every booth                              |
/// | Admin    | SubAdmins it created          | booths created by those SubAdmins        |
/// | SubAdmin | Leafs it created              | booths it created                        |
/// | Leaf     | none                          | booths assigned to it                    |
pub fn resolve(snapshot: &Snapshot, identity: &Account) -> Scope {
    let created_by_identity = |account: &&Account, role: Role| {
        account.role == role && account.created_by == Some(identity.id)
    };

    match identity.role {
        Role::Root => Scope {
            accounts: snapshot.accounts.iter().filter(|a| a.role == Role::Admin).cloned().collect(),
            booths: snapshot.booths.clone(),
        },
        Role::Admin => {
            let accounts: Vec<Account> = snapshot
                .accounts
                .iter()
                .filter(|a| created_by_identity(a, Role::SubAdmin))
                .cloned()
                .collect();
            let sub_admins: HashSet<Uuid> = accounts.iter().map(|a| a.id).collect();
            let booths = snapshot
                .booths
                .iter()
                .filter(|b| sub_admins.contains(&b.created_by))
                .cloned()
                .collect();
            Scope { accounts, booths }
        }
        Role::SubAdmin => Scope {
            accounts: snapshot
                .accounts
                .iter()
                .filter(|a| created_by_identity(a, Role::Leaf))
                .cloned()
                .collect(),
            booths: snapshot.booths.iter().filter(|b| b.created_by == identity.id).cloned().collect(),
        },
        Role::Leaf => Scope {
            accounts: vec![],
            booths: snapshot
                .booths
                .iter()
                .filter(|b| b.assigned_to == Some(identity.id))
                .cloned()
                .collect(),
        },
    }
}

/// Store-backed scope lookups
#[derive(Clone)]
pub struct HierarchyResolver {
    store: Arc<dyn EntityStore>,
}

impl HierarchyResolver {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn scope(&self, identity: &Account) -> BoothResult<Scope> {
        let snapshot = self.store.snapshot().await?;
        let scope = resolve(&snapshot, identity);
        debug!(
            "Resolved scope for {} ({}): {} accounts, {} booths",
            identity.display_name,
            identity.role,
            scope.accounts.len(),
            scope.booths.len()
        );
        Ok(scope)
    }

    /// Scope plus the snapshot it was computed from
    pub async fn scope_with_snapshot(&self, identity: &Account) -> BoothResult<(Scope, Snapshot)> {
        let snapshot = self.store.snapshot().await?;
        let scope = resolve(&snapshot, identity);
        Ok((scope, snapshot))
    }
}
