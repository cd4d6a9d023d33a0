//! Record store boundary.
//!
//! The backup engine composes these operations; the pure engines never touch
//! a store and only see snapshots passed by value.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryPantryStore;
pub use r#trait::{PantryStore, RecordStore, StoreError, Transactional};
