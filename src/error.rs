// Core error types surfaced to the presentation layer
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::StoreError;
use crate::filter::FilterError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoothError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Duplicate name: '{0}' is already taken")]
    DuplicateName(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account is deactivated: {0}")]
    AccountDeactivated(String),

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("{field} value {value} is outside {min}..={max}")]
    OutOfRange { field: &'static str, value: u64, min: u64, max: u64 },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Out of scope: {0}")]
    OutOfScope(String),

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl BoothError {
    /// Stable code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BoothError::NotFound(_) => "NOT_FOUND",
            BoothError::InvalidRole(_) => "INVALID_ROLE",
            BoothError::DuplicateName(_) => "DUPLICATE_NAME",
            BoothError::UserNotFound(_) => "USER_NOT_FOUND",
            BoothError::AccountDeactivated(_) => "ACCOUNT_DEACTIVATED",
            BoothError::InvalidCredential => "INVALID_CREDENTIAL",
            BoothError::OutOfRange { .. } => "OUT_OF_RANGE",
            BoothError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            BoothError::OutOfScope(_) => "OUT_OF_SCOPE",
            BoothError::InvalidInput { .. } => "INVALID_INPUT",
            BoothError::Filter(_) => "INVALID_FILTER",
        }
    }

    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.to_string(),
            "code": self.error_code()
        });

        match self {
            BoothError::InvalidInput { field, .. } => {
                response["field"] = json!(field);
            }
            BoothError::OutOfRange { field, value, min, max } => {
                response["field"] = json!(field);
                response["value"] = json!(value);
                response["range"] = json!([min, max]);
            }
            _ => {}
        }
        response
    }
}

// Static constructor methods
impl BoothError {
    pub fn not_found(message: impl Into<String>) -> Self {
        BoothError::NotFound(message.into())
    }

    pub fn invalid_role(message: impl Into<String>) -> Self {
        BoothError::InvalidRole(message.into())
    }

    pub fn out_of_scope(message: impl Into<String>) -> Self {
        BoothError::OutOfScope(message.into())
    }

    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        BoothError::InvalidInput { field, message: message.into() }
    }

    pub fn out_of_range(field: &'static str, value: u64, min: u64, max: u64) -> Self {
        BoothError::OutOfRange { field, value, min, max }
    }
}

impl From<StoreError> for BoothError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => BoothError::NotFound(msg),
            StoreError::Filter(filter_err) => BoothError::Filter(filter_err),
            other => {
                tracing::error!("Store failure: {}", other);
                BoothError::StoreUnavailable(other.to_string())
            }
        }
    }
}

pub type BoothResult<T> = Result<T, BoothError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn store_errors_map_to_taxonomy() {
        let missing: BoothError = StoreError::NotFound("accounts record x".into()).into();
        assert_eq!(missing.error_code(), "NOT_FOUND");

        let conflict: BoothError = StoreError::Conflict(Uuid::nil()).into();
        assert_eq!(conflict.error_code(), "STORE_UNAVAILABLE");

        let down: BoothError = StoreError::Unavailable("disk gone".into()).into();
        assert!(matches!(down, BoothError::StoreUnavailable(msg) if msg.contains("disk gone")));
    }

    #[test]
    fn out_of_range_json_carries_bounds() {
        let err = BoothError::out_of_range("votes", 101, 1, 100);
        let body = err.to_json();
        assert_eq!(body["code"], "OUT_OF_RANGE");
        assert_eq!(body["range"], json!([1, 100]));
        assert_eq!(err.to_string(), "votes value 101 is outside 1..=100");
    }
}
