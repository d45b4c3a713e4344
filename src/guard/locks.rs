// src/guard/locks.rs

//! Per-scope mutual exclusion.
//!
//! A mutation holds the [`ScopePermit`] for its scope from the sibling read
//! until its write has landed, so two writers in the same scope can never
//! both validate against the same stale snapshot.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::types::NodeId;

/// Identity of a lockable scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// All projects form a single scope.
    Projects,
    /// Tasks of one project.
    Tasks(NodeId),
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Projects => write!(f, "projects"),
            ScopeKey::Tasks(project) => write!(f, "tasks of project {project}"),
        }
    }
}

/// Entries are only pruned once the table grows past this size.
const PRUNE_THRESHOLD: usize = 64;

/// Lazily populated table of one async mutex per scope.
#[derive(Debug, Default)]
pub struct ScopeLocks {
    table: Mutex<HashMap<ScopeKey, Arc<AsyncMutex<()>>>>,
}

/// Exclusive access to one scope; released on drop.
#[derive(Debug)]
pub struct ScopePermit {
    key: ScopeKey,
    _guard: OwnedMutexGuard<()>,
}

impl ScopePermit {
    pub fn key(&self) -> ScopeKey {
        self.key
    }
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    ///
    /// Cancel safe: dropping the future before it resolves leaves the lock
    /// untouched.
    pub async fn acquire(&self, key: ScopeKey) -> ScopePermit {
        let lock = self.lock_for(key);
        let guard = lock.lock_owned().await;
        ScopePermit { key, _guard: guard }
    }

    /// Acquire without waiting; `None` if another mutation holds the scope.
    pub fn try_acquire(&self, key: ScopeKey) -> Option<ScopePermit> {
        let lock = self.lock_for(key);
        lock.try_lock_owned()
            .ok()
            .map(|guard| ScopePermit { key, _guard: guard })
    }

    fn lock_for(&self, key: ScopeKey) -> Arc<AsyncMutex<()>> {
        // The table only hands out Arcs; a panic while holding it cannot leave
        // it inconsistent.
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);

        if table.len() > PRUNE_THRESHOLD {
            // Only this table holds the Arc: no permit and no waiter exists.
            table.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        Arc::clone(table.entry(key).or_default())
    }
}
