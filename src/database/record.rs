use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::database::models::{Account, AccountPatch, Booth, BoothPatch};
use crate::database::store::StoreError;
use crate::filter::{Field, FieldValue, FilterError, Filterable, OrderField, SortKey};

/// The two record collections held by an entity store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Accounts,
    Booths,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Booths => "booths",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record of either collection as it travels through the store interface
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Account(Account),
    Booth(Booth),
}

impl Record {
    pub fn collection(&self) -> Collection {
        match self {
            Record::Account(_) => Collection::Accounts,
            Record::Booth(_) => Collection::Booths,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Record::Account(account) => account.id,
            Record::Booth(booth) => booth.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: Uuid) {
        match self {
            Record::Account(account) => account.id = id,
            Record::Booth(booth) => booth.id = id,
        }
    }
}

/// Partial field update for either collection
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    Account(AccountPatch),
    Booth(BoothPatch),
}

impl Patch {
    pub fn collection(&self) -> Collection {
        match self {
            Patch::Account(_) => Collection::Accounts,
            Patch::Booth(_) => Collection::Booths,
        }
    }
}

/// Typed view over one collection, used by `Repository<T>`
pub trait Entity: Filterable + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
    type Patch: Send;

    fn id(&self) -> Uuid;
    fn into_record(self) -> Record;
    fn from_record(record: Record) -> Result<Self, StoreError>;
    fn wrap_patch(patch: Self::Patch) -> Patch;
}

impl Entity for Account {
    const COLLECTION: Collection = Collection::Accounts;
    type Patch = AccountPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn into_record(self) -> Record {
        Record::Account(self)
    }

    fn from_record(record: Record) -> Result<Self, StoreError> {
        match record {
            Record::Account(account) => Ok(account),
            other => Err(StoreError::CollectionMismatch {
                expected: Collection::Accounts,
                actual: other.collection(),
            }),
        }
    }

    fn wrap_patch(patch: AccountPatch) -> Patch {
        Patch::Account(patch)
    }
}

impl Entity for Booth {
    const COLLECTION: Collection = Collection::Booths;
    type Patch = BoothPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn into_record(self) -> Record {
        Record::Booth(self)
    }

    fn from_record(record: Record) -> Result<Self, StoreError> {
        match record {
            Record::Booth(booth) => Ok(booth),
            other => Err(StoreError::CollectionMismatch {
                expected: Collection::Booths,
                actual: other.collection(),
            }),
        }
    }

    fn wrap_patch(patch: BoothPatch) -> Patch {
        Patch::Booth(patch)
    }
}

impl Filterable for Account {
    fn collection_name() -> &'static str {
        Collection::Accounts.as_str()
    }

    fn columns() -> &'static [Field] {
        &[Field::Id, Field::Role, Field::CreatedBy, Field::Active]
    }

    fn column(&self, field: Field) -> Result<FieldValue, FilterError> {
        match field {
            Field::Id => Ok(self.id.into()),
            Field::Role => Ok(self.role.into()),
            Field::CreatedBy => Ok(self.created_by.into()),
            Field::Active => Ok(self.active.into()),
            Field::AssignedTo => Err(FilterError::InvalidColumn {
                field: field.to_string(),
                collection: Self::collection_name(),
            }),
        }
    }

    fn sort_key(&self, field: OrderField) -> SortKey {
        match field {
            OrderField::CreatedAt => SortKey::Time(self.created_at),
            OrderField::Name => SortKey::Text(self.display_name.to_lowercase()),
        }
    }

    fn record_id(&self) -> Uuid {
        self.id
    }
}

impl Filterable for Booth {
    fn collection_name() -> &'static str {
        Collection::Booths.as_str()
    }

    fn columns() -> &'static [Field] {
        &[Field::Id, Field::CreatedBy, Field::AssignedTo]
    }

    fn column(&self, field: Field) -> Result<FieldValue, FilterError> {
        match field {
            Field::Id => Ok(self.id.into()),
            Field::CreatedBy => Ok(self.created_by.into()),
            Field::AssignedTo => Ok(self.assigned_to.into()),
            Field::Role | Field::Active => Err(FilterError::InvalidColumn {
                field: field.to_string(),
                collection: Self::collection_name(),
            }),
        }
    }

    fn sort_key(&self, field: OrderField) -> SortKey {
        match field {
            OrderField::CreatedAt => SortKey::Time(self.created_at),
            OrderField::Name => SortKey::Text(self.name.to_lowercase()),
        }
    }

    fn record_id(&self) -> Uuid {
        self.id
    }
}
