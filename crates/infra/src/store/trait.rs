use std::sync::Arc;

use thiserror::Error;

use pantry_inventory::InventoryItem;
use pantry_shopping::ShoppingItem;

/// Store operation error.
///
/// These are **infrastructure errors** (backend failures, constraint violations,
/// failed commits) as opposed to domain errors (validation, invariants).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),

    #[error("duplicate record id: {0}")]
    DuplicateId(String),

    #[error("commit failed: {0}")]
    Commit(String),

    #[error("store has uncommitted changes")]
    PendingChanges,
}

/// Typed record collection inside a store.
///
/// Mutations (`insert`, `delete_all`) are staged until the store's
/// [`Transactional::commit`]; `fetch_all` observes staged changes.
pub trait RecordStore<R>: Send + Sync {
    /// All records of this type.
    fn fetch_all(&self) -> Result<Vec<R>, StoreError>;

    /// Stage a new record. Implementations reject an id that is already present.
    fn insert(&self, record: R) -> Result<(), StoreError>;

    /// Stage removal of every record of this type.
    fn delete_all(&self) -> Result<(), StoreError>;
}

/// Unit-of-work boundary over staged mutations.
///
/// Implementations must make `commit` all-or-nothing: after a failed commit the
/// previously committed state is still intact and `rollback` discards the
/// staged work.
pub trait Transactional: Send + Sync {
    fn commit(&self) -> Result<(), StoreError>;

    fn rollback(&self) -> Result<(), StoreError>;

    /// Whether staged mutations are waiting for `commit` or `rollback`.
    fn has_pending_changes(&self) -> Result<bool, StoreError>;
}

/// Everything the backup engine needs from a host store.
pub trait PantryStore: RecordStore<InventoryItem> + RecordStore<ShoppingItem> + Transactional {}

impl<S> PantryStore for S where
    S: RecordStore<InventoryItem> + RecordStore<ShoppingItem> + Transactional + ?Sized
{
}

impl<R, S> RecordStore<R> for Arc<S>
where
    S: RecordStore<R> + ?Sized,
{
    fn fetch_all(&self) -> Result<Vec<R>, StoreError> {
        (**self).fetch_all()
    }

    fn insert(&self, record: R) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        (**self).delete_all()
    }
}

impl<S> Transactional for Arc<S>
where
    S: Transactional + ?Sized,
{
    fn commit(&self) -> Result<(), StoreError> {
        (**self).commit()
    }

    fn rollback(&self) -> Result<(), StoreError> {
        (**self).rollback()
    }

    fn has_pending_changes(&self) -> Result<bool, StoreError> {
        (**self).has_pending_changes()
    }
}
