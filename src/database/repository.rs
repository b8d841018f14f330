use std::sync::Arc;
use uuid::Uuid;

use crate::database::record::Entity;
use crate::database::store::{EntityStore, StoreError};
use crate::filter::{Field, Filter};

/// Typed access to one collection of an `EntityStore`
pub struct Repository<T> {
    store: Arc<dyn EntityStore>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Entity,
{
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    pub async fn select_any(&self, filter: &Filter) -> Result<Vec<T>, StoreError> {
        self.store
            .query(T::COLLECTION, filter)
            .await?
            .into_iter()
            .map(T::from_record)
            .collect()
    }

    pub async fn select_one(&self, filter: &Filter) -> Result<Option<T>, StoreError> {
        Ok(self.select_any(filter).await?.into_iter().next())
    }

    pub async fn select_404(&self, id: Uuid) -> Result<T, StoreError> {
        let record = self.store.get(T::COLLECTION, id).await?;
        T::from_record(record)
    }

    pub async fn select_ids(&self, ids: &[Uuid]) -> Result<Vec<T>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let filter = Filter::new().is_in(Field::Id, ids.iter().copied());
        self.select_any(&filter).await
    }

    pub async fn count(&self, filter: &Filter) -> Result<usize, StoreError> {
        Ok(self.store.query(T::COLLECTION, filter).await?.len())
    }

    pub async fn insert(&self, entity: T) -> Result<T, StoreError> {
        let record = self.store.insert(entity.into_record()).await?;
        T::from_record(record)
    }

    pub async fn update(&self, id: Uuid, patch: T::Patch) -> Result<(), StoreError> {
        self.store.update(id, T::wrap_patch(patch)).await
    }
}
