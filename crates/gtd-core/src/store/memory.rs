use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::error::Result;
use crate::model::{Entity, EntityId};

/// Process-local store backed by a `BTreeMap`.
pub struct MemoryStore<T> {
    inner: RwLock<Inner<T>>,
}

struct Inner<T> {
    entities: BTreeMap<EntityId, T>,
    last_id: EntityId,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entities: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn get_by_id(&self, id: EntityId) -> Result<Option<T>> {
        Ok(self.inner.read().await.entities.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.inner.read().await.entities.values().cloned().collect())
    }

    async fn add_or_update(&self, mut entity: T) -> Result<T> {
        let mut inner = self.inner.write().await;
        let id = match entity.id() {
            Some(id) => id,
            None => {
                inner.last_id += 1;
                inner.last_id
            }
        };
        // Keep the counter ahead of caller-chosen ids.
        inner.last_id = inner.last_id.max(id);
        entity.set_id(id);
        inner.entities.insert(id, entity.clone());
        tracing::debug!(kind = T::KIND, id, "stored entity");
        Ok(entity)
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        self.inner.write().await.entities.remove(&id);
        tracing::debug!(kind = T::KIND, id, "deleted entity");
        Ok(())
    }
}
