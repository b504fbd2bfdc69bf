//! Persistent store backed by redb.
//!
//! # Table design
//!
//! Each entity kind gets its own table named after `Entity::KIND`:
//! ```text
//! key:   id (u64)
//! value: JSON-encoded entity
//! ```
//!
//! A shared `sequences` table records the highest id ever handed out per
//! kind, so ids are never reused after a delete. The id is allocated inside
//! the same write transaction that stores the entity.
//!
//! redb is synchronous; every call runs on the blocking thread pool.
//!
//! redb locks the file for as long as the `Database` lives, so only one
//! process can hold a workspace's store at a time.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, DatabaseError, ReadableTable, TableDefinition};

use super::Store;
use crate::error::{GtdError, Result};
use crate::model::{Entity, EntityId};

// ---------------------------------------------------------------------------
// Table definitions
// ---------------------------------------------------------------------------

/// Key: entity kind. Value: last id allocated for that kind.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

fn entity_table<T: Entity>() -> TableDefinition<'static, EntityId, &'static [u8]> {
    TableDefinition::new(T::KIND)
}

fn store_err(e: impl std::fmt::Display) -> GtdError {
    GtdError::Store(e.to_string())
}

/// Open or create the database file, creating parent directories first.
pub fn open_database(path: &Path) -> Result<Arc<Database>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::create(path).map_err(|e| match e {
        DatabaseError::DatabaseAlreadyOpen => GtdError::StoreLocked(path.to_path_buf()),
        other => store_err(other),
    })?;
    tracing::debug!(path = %path.display(), "opened redb database");
    Ok(Arc::new(db))
}

// ---------------------------------------------------------------------------
// RedbStore
// ---------------------------------------------------------------------------

pub struct RedbStore<T> {
    db: Arc<Database>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Entity> RedbStore<T> {
    /// Wrap a shared database handle, creating this kind's table if needed.
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let wt = db.begin_write().map_err(store_err)?;
        wt.open_table(entity_table::<T>()).map_err(store_err)?;
        wt.open_table(SEQUENCES).map_err(store_err)?;
        wt.commit().map_err(store_err)?;
        Ok(Self {
            db,
            _kind: PhantomData,
        })
    }

    /// Open a database file holding only this kind.
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(open_database(path)?)
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Database) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| GtdError::Store(format!("task join error: {e}")))?
    }
}

#[async_trait]
impl<T: Entity> Store<T> for RedbStore<T> {
    async fn get_by_id(&self, id: EntityId) -> Result<Option<T>> {
        self.blocking(move |db| {
            let rt = db.begin_read().map_err(store_err)?;
            let table = rt.open_table(entity_table::<T>()).map_err(store_err)?;
            let entity = match table.get(id).map_err(store_err)? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            };
            Ok(entity)
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        self.blocking(|db| {
            let rt = db.begin_read().map_err(store_err)?;
            let table = rt.open_table(entity_table::<T>()).map_err(store_err)?;
            let mut result = Vec::new();
            for entry in table.iter().map_err(store_err)? {
                let (_, v) = entry.map_err(store_err)?;
                result.push(serde_json::from_slice(v.value())?);
            }
            Ok(result)
        })
        .await
    }

    async fn add_or_update(&self, mut entity: T) -> Result<T> {
        self.blocking(move |db| {
            let wt = db.begin_write().map_err(store_err)?;
            {
                let mut sequences = wt.open_table(SEQUENCES).map_err(store_err)?;
                let last = sequences
                    .get(T::KIND)
                    .map_err(store_err)?
                    .map(|g| g.value())
                    .unwrap_or(0);
                let id = entity.id().unwrap_or(last + 1);
                if id > last {
                    sequences.insert(T::KIND, id).map_err(store_err)?;
                }
                entity.set_id(id);

                let value = serde_json::to_vec(&entity)?;
                let mut table = wt.open_table(entity_table::<T>()).map_err(store_err)?;
                table.insert(id, value.as_slice()).map_err(store_err)?;
                tracing::debug!(kind = T::KIND, id, "stored entity");
            }
            wt.commit().map_err(store_err)?;
            Ok(entity)
        })
        .await
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        self.blocking(move |db| {
            let wt = db.begin_write().map_err(store_err)?;
            {
                let mut table = wt.open_table(entity_table::<T>()).map_err(store_err)?;
                table.remove(id).map_err(store_err)?;
            }
            wt.commit().map_err(store_err)?;
            tracing::debug!(kind = T::KIND, id, "deleted entity");
            Ok(())
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
