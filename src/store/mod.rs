// src/store/mod.rs

//! Storage ports consumed by the mutation guard and the entity services.
//!
//! The guard only ever reads through [`SiblingReader`] and
//! [`EntityResolver`]; services additionally write through [`EntityStore`].
//! Methods return boxed `Send` futures so implementations can suspend on
//! I/O and the traits stay object safe.
//!
//! [`memory`] provides the in-process implementation used by the CLI and
//! the tests.

use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use crate::domain::ScopedEntity;
use crate::errors::Result;
use crate::types::NodeId;

pub mod memory;

pub use memory::MemoryStore;

/// Future returned by every port method.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// One sibling in a scope, reduced to what graph building needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingRecord {
    pub id: NodeId,
    pub dependencies: Vec<NodeId>,
}

impl SiblingRecord {
    pub fn of<E: ScopedEntity>(entity: &E) -> Self {
        Self {
            id: entity.id(),
            dependencies: entity.dependencies().to_vec(),
        }
    }
}

/// An entity looked up by id, reduced to its scope owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub id: NodeId,
    pub scope_owner: Option<Uuid>,
}

/// Reads the current members of a scope.
pub trait SiblingReader: Send + Sync {
    /// Every entity of this kind, in storage order.
    fn list_all(&self) -> PortFuture<'_, Vec<SiblingRecord>>;

    /// Entities whose scope owner is `owner`, in storage order.
    fn list_by_scope_owner(&self, owner: Uuid) -> PortFuture<'_, Vec<SiblingRecord>>;
}

/// Resolves ids to their scope owner for reference checks.
pub trait EntityResolver: Send + Sync {
    fn get_by_id(&self, id: NodeId) -> PortFuture<'_, Option<ResolvedEntity>>;
}

/// Full entity persistence used by the services.
pub trait EntityStore<E: ScopedEntity>: SiblingReader + EntityResolver {
    fn insert(&self, entity: E) -> PortFuture<'_, ()>;

    fn get(&self, id: NodeId) -> PortFuture<'_, Option<E>>;

    /// All entities, newest first.
    fn list(&self) -> PortFuture<'_, Vec<E>>;

    /// Entities owned by `owner`, in storage order.
    fn list_owned_by(&self, owner: Uuid) -> PortFuture<'_, Vec<E>>;

    /// Overwrite an existing entity. Returns `false` if it does not exist.
    fn replace(&self, entity: E) -> PortFuture<'_, bool>;

    /// Returns `false` if nothing was removed.
    fn remove(&self, id: NodeId) -> PortFuture<'_, bool>;
}
