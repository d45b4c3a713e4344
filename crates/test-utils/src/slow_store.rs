use std::time::Duration;

use planguard::domain::ScopedEntity;
use planguard::store::{
    EntityResolver, EntityStore, PortFuture, ResolvedEntity, SiblingReader, SiblingRecord,
};
use planguard::types::NodeId;
use uuid::Uuid;

/// Store wrapper whose sibling reads return a snapshot and then stall.
///
/// Two unsynchronised writers in the same scope would both validate against
/// the stale snapshot; the guard's scope lock has to prevent that.
#[derive(Debug, Clone)]
pub struct SlowStore<S> {
    inner: S,
    delay: Duration,
}

impl<S> SlowStore<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SiblingReader> SiblingReader for SlowStore<S> {
    fn list_all(&self) -> PortFuture<'_, Vec<SiblingRecord>> {
        Box::pin(async move {
            let snapshot = self.inner.list_all().await;
            tokio::time::sleep(self.delay).await;
            snapshot
        })
    }

    fn list_by_scope_owner(&self, owner: Uuid) -> PortFuture<'_, Vec<SiblingRecord>> {
        Box::pin(async move {
            let snapshot = self.inner.list_by_scope_owner(owner).await;
            tokio::time::sleep(self.delay).await;
            snapshot
        })
    }
}

impl<S: EntityResolver> EntityResolver for SlowStore<S> {
    fn get_by_id(&self, id: NodeId) -> PortFuture<'_, Option<ResolvedEntity>> {
        self.inner.get_by_id(id)
    }
}

impl<E, S> EntityStore<E> for SlowStore<S>
where
    E: ScopedEntity,
    S: EntityStore<E>,
{
    fn insert(&self, entity: E) -> PortFuture<'_, ()> {
        self.inner.insert(entity)
    }

    fn get(&self, id: NodeId) -> PortFuture<'_, Option<E>> {
        self.inner.get(id)
    }

    fn list(&self) -> PortFuture<'_, Vec<E>> {
        self.inner.list()
    }

    fn list_owned_by(&self, owner: Uuid) -> PortFuture<'_, Vec<E>> {
        self.inner.list_owned_by(owner)
    }

    fn replace(&self, entity: E) -> PortFuture<'_, bool> {
        self.inner.replace(entity)
    }

    fn remove(&self, id: NodeId) -> PortFuture<'_, bool> {
        self.inner.remove(id)
    }
}
