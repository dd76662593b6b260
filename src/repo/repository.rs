//! The offline-first repository dispatcher.
//!
//! Each operation reads the connectivity monitor exactly once, at call
//! time, and commits to one branch:
//!
//! - online: the remote call is authoritative; the cache is updated only
//!   after it succeeds (write-through). A remote failure propagates to the
//!   caller — there is no fallback to the cache while believed online.
//! - offline: the cache is the whole story; no remote call is attempted.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::connectivity::ConnectivityMonitor;
use crate::remote::{ApiClient, RemoteResult};
use crate::store::CacheStore;

use super::resource::Resource;

/// Write-through/fallback dispatcher for one entity type.
pub struct Repository<T: Resource> {
    client: ApiClient,
    cache: Arc<CacheStore>,
    connectivity: Arc<ConnectivityMonitor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: Arc::clone(&self.cache),
            connectivity: Arc::clone(&self.connectivity),
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> Repository<T> {
    pub fn new(
        client: ApiClient,
        cache: Arc<CacheStore>,
        connectivity: Arc<ConnectivityMonitor>,
    ) -> Self {
        Self {
            client,
            cache,
            connectivity,
            _marker: PhantomData,
        }
    }

    fn endpoint(&self) -> String {
        format!("/v1/{}", T::KIND)
    }

    /// All entities, scoped by `parent` for parent-scoped kinds.
    ///
    /// Online: fetch, upsert every returned entity into the cache, return
    /// the remote list. Offline: serve the cached collection.
    pub async fn get_all(&self, parent: Option<&str>) -> RemoteResult<Vec<T>> {
        if self.connectivity.is_online() {
            let path = match parent {
                Some(parent_id) => format!("{}/from/{}", self.endpoint(), parent_id),
                None => self.endpoint(),
            };
            let response = self.client.get(&path).send().await?;
            let entities: Vec<T> = ApiClient::handle_response(response).await?;
            for entity in &entities {
                entity.store(&self.cache);
            }
            Ok(entities)
        } else {
            Ok(T::cached(&self.cache, parent))
        }
    }

    /// Create an entity.
    ///
    /// Online: the server-returned entity (which may carry a server-assigned
    /// id) is cached and returned. Offline: the client-supplied entity is
    /// cached as-is and keeps its client-chosen id permanently; there is no
    /// reconciliation when connectivity returns.
    pub async fn insert(&self, entity: T) -> RemoteResult<T> {
        if self.connectivity.is_online() {
            let response = self.client.post(&self.endpoint()).json(&entity).send().await?;
            let created: T = ApiClient::handle_response(response).await?;
            created.store(&self.cache);
            Ok(created)
        } else {
            entity.store(&self.cache);
            Ok(entity)
        }
    }

    /// Full-document replace.
    ///
    /// On a successful remote call the cache receives the locally supplied
    /// entity, not a re-fetched copy: the cache reflects client intent.
    pub async fn update(&self, id: &str, entity: T) -> RemoteResult<T> {
        if self.connectivity.is_online() {
            let path = format!("{}/{}", self.endpoint(), id);
            let response = self.client.put(&path).json(&entity).send().await?;
            ApiClient::ensure_success(response).await?;
        }
        entity.store(&self.cache);
        Ok(entity)
    }

    /// Delete by id, cascading where the entity type implies it (a column
    /// takes its tasks with it).
    pub async fn delete(&self, id: &str) -> RemoteResult<()> {
        if self.connectivity.is_online() {
            let path = format!("{}/{}", self.endpoint(), id);
            let response = self.client.delete(&path).send().await?;
            ApiClient::ensure_success(response).await?;
        }
        T::evict(&self.cache, id);
        Ok(())
    }
}
