use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::database::models::Role;
use super::error::FilterError;

/// Columns that predicates may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Role,
    CreatedBy,
    AssignedTo,
    Active,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Role => "role",
            Field::CreatedBy => "created_by",
            Field::AssignedTo => "assigned_to",
            Field::Active => "active",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Id(Uuid),
    Role(Role),
    Bool(bool),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Same variant, ignoring the payload
    pub fn same_kind(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<Uuid> for FieldValue {
    fn from(id: Uuid) -> Self {
        FieldValue::Id(id)
    }
}

impl From<Option<Uuid>> for FieldValue {
    fn from(id: Option<Uuid>) -> Self {
        id.map(FieldValue::Id).unwrap_or(FieldValue::Null)
    }
}

impl From<Role> for FieldValue {
    fn from(role: Role) -> Self {
        FieldValue::Role(role)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Bool(flag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    Eq,
    Neq,
    In,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub field: Field,
    pub operator: FilterOp,
    pub data: Vec<FieldValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    CreatedAt,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterOrderInfo {
    pub field: OrderField,
    pub sort: SortDirection,
}

/// Comparable value extracted for ordering
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Time(DateTime<Utc>),
    Text(String),
}

/// Records the filter engine can evaluate predicates against
pub trait Filterable {
    /// Collection name used in error messages
    fn collection_name() -> &'static str;

    /// Every column `column` can answer for
    fn columns() -> &'static [Field];

    /// Current value of `field`, or `InvalidColumn` when the collection lacks it
    fn column(&self, field: Field) -> Result<FieldValue, FilterError>;

    fn sort_key(&self, field: OrderField) -> SortKey;

    /// Final tie-breaker so ordering is total
    fn record_id(&self) -> Uuid;
}
