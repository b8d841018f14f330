use std::cmp::Ordering;

use super::types::{FilterOrderInfo, Filterable, OrderField, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Default ordering: creation time ascending
    pub fn default_order() -> Vec<FilterOrderInfo> {
        vec![FilterOrderInfo { field: OrderField::CreatedAt, sort: SortDirection::Asc }]
    }

    pub fn compare<T: Filterable>(infos: &[FilterOrderInfo], a: &T, b: &T) -> Ordering {
        for info in infos {
            let ordering = a.sort_key(info.field).cmp(&b.sort_key(info.field));
            let ordering = match info.sort {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.record_id().cmp(&b.record_id())
    }
}
