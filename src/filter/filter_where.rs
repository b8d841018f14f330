use super::error::FilterError;
use super::types::{FieldValue, FilterOp, FilterWhereInfo, Filterable};

/// Evaluates a conjunction of conditions against a single record
pub struct FilterWhere;

impl FilterWhere {
    pub fn validate(condition: &FilterWhereInfo) -> Result<(), FilterError> {
        match condition.operator {
            FilterOp::Eq | FilterOp::Neq if condition.data.len() != 1 => Err(
                FilterError::InvalidOperatorData(format!("{:?} requires exactly one value", condition.operator)),
            ),
            _ => Ok(()),
        }
    }

    /// Check every condition against the columns of `T` before any record is read
    pub fn validate_all<T: Filterable>(conditions: &[FilterWhereInfo]) -> Result<(), FilterError> {
        for condition in conditions {
            if !T::columns().contains(&condition.field) {
                return Err(FilterError::InvalidColumn {
                    field: condition.field.to_string(),
                    collection: T::collection_name(),
                });
            }
            Self::validate(condition)?;
        }
        Ok(())
    }

    pub fn evaluate<T: Filterable>(conditions: &[FilterWhereInfo], record: &T) -> Result<bool, FilterError> {
        for condition in conditions {
            if !Self::evaluate_one(condition, record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn evaluate_one<T: Filterable>(condition: &FilterWhereInfo, record: &T) -> Result<bool, FilterError> {
        Self::validate(condition)?;
        let actual = record.column(condition.field)?;

        for expected in &condition.data {
            Self::check_kind(condition, &actual, expected)?;
        }

        Ok(match condition.operator {
            FilterOp::Eq => actual == condition.data[0],
            FilterOp::Neq => actual != condition.data[0],
            // Empty membership matches nothing
            FilterOp::In => condition.data.iter().any(|v| *v == actual),
        })
    }

    fn check_kind(condition: &FilterWhereInfo, actual: &FieldValue, expected: &FieldValue) -> Result<(), FilterError> {
        if actual.is_null() || expected.is_null() || actual.same_kind(expected) {
            return Ok(());
        }
        Err(FilterError::InvalidOperatorData(format!(
            "value {:?} cannot be compared with column {}",
            expected, condition.field
        )))
    }
}
