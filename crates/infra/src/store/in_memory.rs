use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use pantry_core::Entity;
use pantry_inventory::InventoryItem;
use pantry_shopping::ShoppingItem;

use super::r#trait::{RecordStore, StoreError, Transactional};

#[derive(Debug, Clone, Default)]
struct Tables {
    inventory: Vec<InventoryItem>,
    shopping: Vec<ShoppingItem>,
}

#[derive(Debug, Default)]
struct State {
    committed: Tables,
    /// Working copy; `Some` while there are uncommitted changes.
    staged: Option<Tables>,
}

impl State {
    fn visible(&self) -> &Tables {
        self.staged.as_ref().unwrap_or(&self.committed)
    }

    fn working(&mut self) -> &mut Tables {
        let committed = &self.committed;
        self.staged.get_or_insert_with(|| committed.clone())
    }
}

/// In-memory pantry store with staged, all-or-nothing commits.
///
/// Intended for tests/dev and as the reference for host adapters.
#[derive(Debug, Default)]
pub struct InMemoryPantryStore {
    state: RwLock<State>,
    fail_next_commit: AtomicBool,
}

impl InMemoryPantryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `commit` fail without publishing anything.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> Result<T, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut State) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        f(&mut state)
    }
}

macro_rules! impl_record_store {
    ($record:ty, $table:ident) => {
        impl RecordStore<$record> for InMemoryPantryStore {
            fn fetch_all(&self) -> Result<Vec<$record>, StoreError> {
                self.read(|state| state.visible().$table.clone())
            }

            fn insert(&self, record: $record) -> Result<(), StoreError> {
                self.write(|state| {
                    let table = &mut state.working().$table;
                    if table.iter().any(|existing| existing.id() == record.id()) {
                        return Err(StoreError::DuplicateId(record.id().to_string()));
                    }
                    table.push(record);
                    Ok(())
                })
            }

            fn delete_all(&self) -> Result<(), StoreError> {
                self.write(|state| {
                    state.working().$table.clear();
                    Ok(())
                })
            }
        }
    };
}

impl_record_store!(InventoryItem, inventory);
impl_record_store!(ShoppingItem, shopping);

impl Transactional for InMemoryPantryStore {
    fn commit(&self) -> Result<(), StoreError> {
        self.write(|state| {
            if self.fail_next_commit.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Commit("injected commit failure".to_string()));
            }
            if let Some(staged) = state.staged.take() {
                tracing::debug!(
                    inventory = staged.inventory.len(),
                    shopping = staged.shopping.len(),
                    "in-memory store committed"
                );
                state.committed = staged;
            }
            Ok(())
        })
    }

    fn rollback(&self) -> Result<(), StoreError> {
        self.write(|state| {
            if state.staged.take().is_some() {
                tracing::debug!("in-memory store rolled back staged changes");
            }
            Ok(())
        })
    }

    fn has_pending_changes(&self) -> Result<bool, StoreError> {
        self.read(|state| state.staged.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
    }

    fn fetch_inventory(store: &InMemoryPantryStore) -> Vec<InventoryItem> {
        RecordStore::<InventoryItem>::fetch_all(store).unwrap()
    }

    #[test]
    fn staged_inserts_visible_then_committed() {
        let store = InMemoryPantryStore::new();
        RecordStore::<InventoryItem>::insert(&store, InventoryItem::new("Rice", test_time())).unwrap();
        assert!(store.has_pending_changes().unwrap());
        assert_eq!(fetch_inventory(&store).len(), 1);

        store.commit().unwrap();
        assert!(!store.has_pending_changes().unwrap());
        assert_eq!(fetch_inventory(&store).len(), 1);
    }

    #[test]
    fn rollback_restores_committed_state() {
        let store = InMemoryPantryStore::new();
        RecordStore::<ShoppingItem>::insert(&store, ShoppingItem::new("Soap", test_time())).unwrap();
        store.commit().unwrap();

        RecordStore::<ShoppingItem>::delete_all(&store).unwrap();
        assert!(RecordStore::<ShoppingItem>::fetch_all(&store).unwrap().is_empty());

        store.rollback().unwrap();
        assert_eq!(RecordStore::<ShoppingItem>::fetch_all(&store).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let store = InMemoryPantryStore::new();
        let item = InventoryItem::new("Beans", test_time());
        RecordStore::<InventoryItem>::insert(&store, item.clone()).unwrap();
        let err = RecordStore::<InventoryItem>::insert(&store, item.clone()).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(item.id.to_string()));
    }

    #[test]
    fn failed_commit_keeps_previous_state() {
        let store = InMemoryPantryStore::new();
        RecordStore::<InventoryItem>::insert(&store, InventoryItem::new("Oil", test_time())).unwrap();
        store.commit().unwrap();

        RecordStore::<InventoryItem>::delete_all(&store).unwrap();
        store.fail_next_commit();
        assert!(matches!(store.commit(), Err(StoreError::Commit(_))));
        store.rollback().unwrap();

        assert_eq!(fetch_inventory(&store).len(), 1);
        // Failure is one-shot.
        store.commit().unwrap();
    }
}
