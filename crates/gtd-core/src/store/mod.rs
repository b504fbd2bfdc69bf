//! Key-indexed persistence for entities.
//!
//! All access goes through the async `Store` trait. Two backends ship with
//! the crate: `MemoryStore` for tests and ephemeral use, and `RedbStore`
//! for an on-disk database file.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::Result;
use crate::model::{Action, ActionList, Entity, EntityId, Project};

pub mod db;
pub mod memory;

pub use db::RedbStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    async fn get_by_id(&self, id: EntityId) -> Result<Option<T>>;

    /// Every stored entity, ordered by id.
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Insert or replace `entity`, assigning a fresh id when it has none.
    /// Returns the persisted form.
    async fn add_or_update(&self, entity: T) -> Result<T>;

    /// Remove the entity with `id`. Removing a missing id is a no-op.
    async fn delete(&self, id: EntityId) -> Result<()>;
}

/// The three stores a GTD workspace needs, sharing one backend.
#[derive(Clone)]
pub struct Stores {
    pub actions: Arc<dyn Store<Action>>,
    pub lists: Arc<dyn Store<ActionList>>,
    pub projects: Arc<dyn Store<Project>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            actions: Arc::new(MemoryStore::new()),
            lists: Arc::new(MemoryStore::new()),
            projects: Arc::new(MemoryStore::new()),
        }
    }

    /// Open (or create) a redb database at `path` holding all three tables.
    pub fn redb(path: &Path) -> Result<Self> {
        let db = db::open_database(path)?;
        Ok(Self {
            actions: Arc::new(RedbStore::new(db.clone())?),
            lists: Arc::new(RedbStore::new(db.clone())?),
            projects: Arc::new(RedbStore::new(db)?),
        })
    }

    /// Build the stores described by `config`, resolving relative paths
    /// against `root`.
    pub fn open(root: &Path, config: &StoreConfig) -> Result<Self> {
        match config.backend {
            StoreBackend::Memory => Ok(Self::in_memory()),
            StoreBackend::Redb => Self::redb(&root.join(&config.path)),
        }
    }
}
