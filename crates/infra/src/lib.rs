//! Infrastructure layer: record store boundary, backup export/import, config.

pub mod backup;
pub mod config;
pub mod store;


pub use backup::{BackupDocument, BackupEngine, BackupError, BackupSnapshot, ImportSummary, SCHEMA_VERSION};
pub use config::PantryConfig;
pub use store::{InMemoryPantryStore, PantryStore, RecordStore, StoreError, Transactional};
