//! Binding between entity types and their endpoint kind + cache collection.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{Board, CacheStore, Column, Task, TaskPatch};

/// An entity type the repository can dispatch.
///
/// `KIND` names the `/v1/<kind>` endpoint family. The cache hooks route
/// reads and writes to the matching collection; `evict` carries any cascade
/// the entity type implies.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: &'static str;

    /// Cached entities, scoped by the parent id for parent-scoped kinds.
    fn cached(cache: &CacheStore, parent: Option<&str>) -> Vec<Self>;

    /// Upsert into the cache.
    fn store(&self, cache: &CacheStore);

    /// Remove from the cache.
    fn evict(cache: &CacheStore, id: &str);
}

impl Resource for Board {
    const KIND: &'static str = "board";

    fn cached(cache: &CacheStore, _parent: Option<&str>) -> Vec<Self> {
        cache.boards()
    }

    fn store(&self, cache: &CacheStore) {
        cache.save_board(self);
    }

    fn evict(cache: &CacheStore, id: &str) {
        cache.delete_board(id);
    }
}

impl Resource for Column {
    const KIND: &'static str = "column";

    fn cached(cache: &CacheStore, parent: Option<&str>) -> Vec<Self> {
        parent.map(|board_id| cache.columns(board_id)).unwrap_or_default()
    }

    fn store(&self, cache: &CacheStore) {
        cache.save_column(self);
    }

    // Cascades: the column's tasks go with it.
    fn evict(cache: &CacheStore, id: &str) {
        cache.delete_column(id);
    }
}

impl Resource for Task {
    const KIND: &'static str = "task";

    fn cached(cache: &CacheStore, parent: Option<&str>) -> Vec<Self> {
        parent
            .map(|column_id| cache.tasks_in_column(column_id))
            .unwrap_or_default()
    }

    fn store(&self, cache: &CacheStore) {
        cache.save_task(&self.id, &TaskPatch::from(self));
    }

    fn evict(cache: &CacheStore, id: &str) {
        cache.delete_task(id);
    }
}
