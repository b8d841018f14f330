use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Fixed role chain, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Root,
    Admin,
    SubAdmin,
    Leaf,
}

/// Valid parent -> child creation edges. Every role check goes through this table.
pub const CREATION_EDGES: &[(Role, Role)] = &[
    (Role::Root, Role::Admin),
    (Role::Admin, Role::SubAdmin),
    (Role::SubAdmin, Role::Leaf),
];

impl Role {
    pub const ALL: [Role; 4] = [Role::Root, Role::Admin, Role::SubAdmin, Role::Leaf];

    /// True when an account of this role may create an account of `child` role
    pub fn can_create(self, child: Role) -> bool {
        CREATION_EDGES
            .iter()
            .any(|&(parent, c)| parent == self && c == child)
    }

    /// The role this role creates, if any
    pub fn child(self) -> Option<Role> {
        CREATION_EDGES
            .iter()
            .find(|(parent, _)| *parent == self)
            .map(|&(_, child)| child)
    }

    /// The role that creates this role, if any
    pub fn parent(self) -> Option<Role> {
        CREATION_EDGES
            .iter()
            .find(|(_, child)| *child == self)
            .map(|&(parent, _)| parent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Admin => "admin",
            Role::SubAdmin => "sub_admin",
            Role::Leaf => "leaf",
        }
    }

    /// Human-facing label used by dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Role::Root => "Super-Admin",
            Role::Admin => "Admin",
            Role::SubAdmin => "Sub Admin",
            Role::Leaf => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "root" | "super_admin" => Ok(Role::Root),
            "admin" => Ok(Role::Admin),
            "sub_admin" | "subadmin" => Ok(Role::SubAdmin),
            "leaf" | "user" => Ok(Role::Leaf),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A login-capable identity at exactly one role level.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub display_name: String,
    /// Sealed credential as produced by the configured `CredentialVerifier`
    pub credential: String,
    pub role: Role,
    /// `None` only for the Root account
    pub created_by: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        display_name: impl Into<String>,
        credential: impl Into<String>,
        role: Role,
        created_by: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            credential: credential.into(),
            role,
            created_by,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive display name comparison
    pub fn name_matches(&self, name: &str) -> bool {
        self.display_name.to_lowercase() == name.to_lowercase()
    }

    /// Apply a partial update; unspecified fields stay untouched
    pub fn apply(&mut self, patch: &AccountPatch) {
        if let Some(name) = &patch.display_name {
            self.display_name = name.clone();
        }
        if let Some(credential) = &patch.credential {
            self.credential = credential.clone();
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.updated_at = Utc::now();
    }
}

// Credentials stay out of logs and debug output.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("credential", &"<redacted>")
            .field("role", &self.role)
            .field("created_by", &self.created_by)
            .field("active", &self.active)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Partial account update. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountPatch {
    pub display_name: Option<String>,
    pub credential: Option<String>,
    pub active: Option<bool>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.credential.is_none() && self.active.is_none()
    }
}
