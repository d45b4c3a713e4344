// src/store/memory.rs

//! In-memory implementation of the storage ports.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::domain::ScopedEntity;
use crate::errors::{PlanError, Result};
use crate::store::{
    EntityResolver, EntityStore, PortFuture, ResolvedEntity, SiblingReader, SiblingRecord,
};
use crate::types::NodeId;

/// Process-local store for one entity kind.
///
/// Cloning is cheap and clones share the same data. Entries keep insertion
/// order, which is the order siblings are reported in.
#[derive(Debug)]
pub struct MemoryStore<E> {
    entries: Arc<RwLock<IndexMap<NodeId, E>>>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<E: ScopedEntity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<NodeId, E>>> {
        self.entries
            .read()
            .map_err(|_| PlanError::Storage(format!("{} store lock poisoned", E::KIND)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<NodeId, E>>> {
        self.entries
            .write()
            .map_err(|_| PlanError::Storage(format!("{} store lock poisoned", E::KIND)))
    }

    fn siblings_where(&self, keep: impl Fn(&E) -> bool) -> Result<Vec<SiblingRecord>> {
        let entries = self.read()?;
        Ok(entries
            .values()
            .filter(|entity| keep(entity))
            .map(SiblingRecord::of)
            .collect())
    }
}

impl<E: ScopedEntity> SiblingReader for MemoryStore<E> {
    fn list_all(&self) -> PortFuture<'_, Vec<SiblingRecord>> {
        let result = self.siblings_where(|_| true);
        Box::pin(async move { result })
    }

    fn list_by_scope_owner(&self, owner: Uuid) -> PortFuture<'_, Vec<SiblingRecord>> {
        let result = self.siblings_where(|entity| entity.scope_owner() == Some(owner));
        Box::pin(async move { result })
    }
}

impl<E: ScopedEntity> EntityResolver for MemoryStore<E> {
    fn get_by_id(&self, id: NodeId) -> PortFuture<'_, Option<ResolvedEntity>> {
        let result = self.read().map(|entries| {
            entries.get(&id).map(|entity| ResolvedEntity {
                id,
                scope_owner: entity.scope_owner(),
            })
        });
        Box::pin(async move { result })
    }
}

impl<E: ScopedEntity> EntityStore<E> for MemoryStore<E> {
    fn insert(&self, entity: E) -> PortFuture<'_, ()> {
        let result = self.write().map(|mut entries| {
            debug!(kind = E::KIND, id = %entity.id(), "storing new entity");
            entries.insert(entity.id(), entity);
        });
        Box::pin(async move { result })
    }

    fn get(&self, id: NodeId) -> PortFuture<'_, Option<E>> {
        let result = self.read().map(|entries| entries.get(&id).cloned());
        Box::pin(async move { result })
    }

    fn list(&self) -> PortFuture<'_, Vec<E>> {
        let result = self.read().map(|entries| {
            let mut all: Vec<E> = entries.values().cloned().collect();
            all.sort_by_key(|entity| std::cmp::Reverse(entity.created_at()));
            all
        });
        Box::pin(async move { result })
    }

    fn list_owned_by(&self, owner: Uuid) -> PortFuture<'_, Vec<E>> {
        let result = self.read().map(|entries| {
            entries
                .values()
                .filter(|entity| entity.scope_owner() == Some(owner))
                .cloned()
                .collect()
        });
        Box::pin(async move { result })
    }

    fn replace(&self, entity: E) -> PortFuture<'_, bool> {
        let result = self.write().map(|mut entries| match entries.get_mut(&entity.id()) {
            Some(slot) => {
                trace!(kind = E::KIND, id = %entity.id(), "replacing entity");
                *slot = entity;
                true
            }
            None => false,
        });
        Box::pin(async move { result })
    }

    fn remove(&self, id: NodeId) -> PortFuture<'_, bool> {
        let result = self
            .write()
            .map(|mut entries| entries.shift_remove(&id).is_some());
        Box::pin(async move { result })
    }
}
