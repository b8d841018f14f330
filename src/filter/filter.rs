use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{Field, FieldValue, FilterOp, FilterOrderInfo, FilterWhereInfo, Filterable, OrderField, SortDirection};

/// Conjunctive query over one collection, built fluently:
///
/// ```
/// use boothverse::filter::{Field, Filter};
/// use boothverse::database::models::Role;
///
/// let filter = Filter::new().eq(Field::Role, Role::Admin).eq(Field::Active, true);
/// assert_eq!(filter.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<FilterWhereInfo>,
    order: Vec<FilterOrderInfo>,
    limit: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.conditions.push(FilterWhereInfo { field, operator: FilterOp::Eq, data: vec![value.into()] });
        self
    }

    pub fn neq(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.conditions.push(FilterWhereInfo { field, operator: FilterOp::Neq, data: vec![value.into()] });
        self
    }

    pub fn is_null(self, field: Field) -> Self {
        self.eq(field, FieldValue::Null)
    }

    pub fn is_in<V: Into<FieldValue>>(mut self, field: Field, values: impl IntoIterator<Item = V>) -> Self {
        let data = values.into_iter().map(Into::into).collect();
        self.conditions.push(FilterWhereInfo { field, operator: FilterOp::In, data });
        self
    }

    pub fn order(mut self, field: OrderField, sort: SortDirection) -> Self {
        self.order.push(FilterOrderInfo { field, sort });
        self
    }

    pub fn limit(mut self, limit: usize) -> Result<Self, FilterError> {
        if limit == 0 {
            return Err(FilterError::InvalidLimit("Limit must be positive".to_string()));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn conditions(&self) -> &[FilterWhereInfo] {
        &self.conditions
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> Result<bool, FilterError> {
        FilterWhere::evaluate(&self.conditions, record)
    }

    /// Select, order and limit `records`
    pub fn apply<'a, T, I>(&self, records: I) -> Result<Vec<T>, FilterError>
    where
        T: Filterable + Clone + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        FilterWhere::validate_all::<T>(&self.conditions)?;

        let mut selected = Vec::new();
        for record in records {
            if self.matches(record)? {
                selected.push(record.clone());
            }
        }

        let order = if self.order.is_empty() { FilterOrder::default_order() } else { self.order.clone() };
        selected.sort_by(|a, b| FilterOrder::compare(&order, a, b));

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        Ok(selected)
    }
}
