//! Versioned backup export/import.
//!
//! A backup is a single JSON document holding every pantry and shopping record.
//! Encoding is deterministic (lexicographic keys, RFC 3339 UTC timestamps), so
//! two exports of the same records differ only in `exportedAt`.
//!
//! Import is destructive-replace: the document is decoded and validated in
//! full, then both collections in the store are swapped for the decoded
//! records in one unit of work. Nothing in the store changes when the version
//! is unsupported, the document is malformed, or the commit fails.

pub mod document;
pub mod engine;

pub use document::{BackupDocument, BackupSnapshot, InventoryItemRecord, ShoppingItemRecord};
pub use engine::{BackupEngine, ImportSummary};

use thiserror::Error;

use crate::store::StoreError;

/// Layout version written by this engine and the only one it imports.
pub const SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackupError {
    #[error("unsupported backup schema version {0}")]
    UnsupportedSchema(i64),

    #[error("malformed backup document: {0}")]
    Decode(String),

    #[error("failed to encode backup document: {0}")]
    Encode(String),

    #[error("store rejected the restore: {0}")]
    Store(StoreError),

    #[error("store commit failed: {0}")]
    Commit(StoreError),
}
