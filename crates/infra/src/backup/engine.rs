use chrono::{DateTime, Utc};

use pantry_inventory::InventoryItem;
use pantry_shopping::ShoppingItem;

use super::document::{BackupDocument, BackupSnapshot, DocumentHeader};
use super::{BackupError, SCHEMA_VERSION};
use crate::config::PantryConfig;
use crate::store::{PantryStore, RecordStore, StoreError};

/// Record counts written by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inventory_items: usize,
    pub shopping_items: usize,
}

/// Backup export/import.
///
/// Holds only formatting options; every call works on the inputs it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupEngine {
    pretty: bool,
}

impl Default for BackupEngine {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl BackupEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PantryConfig) -> Self {
        Self {
            pretty: config.pretty_backups,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Build a document from in-memory snapshots.
    pub fn export(
        &self,
        inventory: &[InventoryItem],
        shopping: &[ShoppingItem],
        exported_at: DateTime<Utc>,
    ) -> BackupDocument {
        tracing::debug!(
            inventory = inventory.len(),
            shopping = shopping.len(),
            "exporting backup"
        );
        BackupDocument::new(exported_at, inventory, shopping)
    }

    /// Export straight to bytes.
    pub fn export_bytes(
        &self,
        inventory: &[InventoryItem],
        shopping: &[ShoppingItem],
        exported_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, BackupError> {
        self.encode(&self.export(inventory, shopping, exported_at))
    }

    /// Export the records a store currently exposes through `fetch_all`.
    ///
    /// Staged changes that have not been committed yet are included.
    pub fn export_store<S>(&self, store: &S, exported_at: DateTime<Utc>) -> Result<Vec<u8>, BackupError>
    where
        S: PantryStore + ?Sized,
    {
        let inventory = RecordStore::<InventoryItem>::fetch_all(store).map_err(BackupError::Store)?;
        let shopping = RecordStore::<ShoppingItem>::fetch_all(store).map_err(BackupError::Store)?;
        self.export_bytes(&inventory, &shopping, exported_at)
    }

    /// Serialize with keys in lexicographic order.
    pub fn encode(&self, document: &BackupDocument) -> Result<Vec<u8>, BackupError> {
        // serde_json's default map is ordered, so going through `Value` sorts every object.
        let value =
            serde_json::to_value(document).map_err(|e| BackupError::Encode(e.to_string()))?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&value)
        } else {
            serde_json::to_vec(&value)
        };
        bytes.map_err(|e| BackupError::Encode(e.to_string()))
    }

    /// Parse and validate a document without touching any store.
    ///
    /// The version is checked before the records are looked at, so documents
    /// from other schema versions fail with `UnsupportedSchema` whatever their layout.
    pub fn decode(&self, bytes: &[u8]) -> Result<BackupSnapshot, BackupError> {
        let header: DocumentHeader =
            serde_json::from_slice(bytes).map_err(|e| BackupError::Decode(e.to_string()))?;
        ensure_supported(header.schema_version)?;

        let document: BackupDocument =
            serde_json::from_slice(bytes).map_err(|e| BackupError::Decode(e.to_string()))?;
        document
            .into_snapshot()
            .map_err(|e| BackupError::Decode(e.to_string()))
    }

    /// Replace every record in `store` with the contents of an encoded backup.
    ///
    /// The store must have no staged changes: the import owns its unit of work
    /// and rolls it back on failure. A store with pending changes is refused
    /// with `StoreError::PendingChanges` and left as it was.
    pub fn import<S>(&self, bytes: &[u8], store: &S) -> Result<ImportSummary, BackupError>
    where
        S: PantryStore + ?Sized,
    {
        let snapshot = self.decode(bytes)?;
        restore(snapshot, store)
    }

    /// Same as [`BackupEngine::import`] for an already parsed document.
    pub fn import_document<S>(&self, document: BackupDocument, store: &S) -> Result<ImportSummary, BackupError>
    where
        S: PantryStore + ?Sized,
    {
        ensure_supported(document.schema_version)?;
        let snapshot = document
            .into_snapshot()
            .map_err(|e| BackupError::Decode(e.to_string()))?;
        restore(snapshot, store)
    }
}

fn ensure_supported(found: i64) -> Result<(), BackupError> {
    if found != SCHEMA_VERSION {
        tracing::warn!(found, supported = SCHEMA_VERSION, "rejecting backup with unsupported schema");
        return Err(BackupError::UnsupportedSchema(found));
    }
    Ok(())
}

/// Swap both collections for the snapshot's records as one unit of work.
fn restore<S>(snapshot: BackupSnapshot, store: &S) -> Result<ImportSummary, BackupError>
where
    S: PantryStore + ?Sized,
{
    if store.has_pending_changes().map_err(BackupError::Store)? {
        tracing::warn!("refusing import into a store with uncommitted changes");
        return Err(BackupError::Store(StoreError::PendingChanges));
    }

    let summary = ImportSummary {
        inventory_items: snapshot.inventory.len(),
        shopping_items: snapshot.shopping.len(),
    };

    if let Err(err) = stage_replacement(snapshot, store) {
        roll_back(store);
        return Err(BackupError::Store(err));
    }

    if let Err(err) = store.commit() {
        roll_back(store);
        return Err(BackupError::Commit(err));
    }

    tracing::info!(
        inventory = summary.inventory_items,
        shopping = summary.shopping_items,
        "backup imported"
    );
    Ok(summary)
}

fn stage_replacement<S>(snapshot: BackupSnapshot, store: &S) -> Result<(), StoreError>
where
    S: PantryStore + ?Sized,
{
    RecordStore::<InventoryItem>::delete_all(store)?;
    RecordStore::<ShoppingItem>::delete_all(store)?;
    for item in snapshot.inventory {
        RecordStore::<InventoryItem>::insert(store, item)?;
    }
    for item in snapshot.shopping {
        RecordStore::<ShoppingItem>::insert(store, item)?;
    }
    Ok(())
}

fn roll_back<S>(store: &S)
where
    S: PantryStore + ?Sized,
{
    if let Err(err) = store.rollback() {
        tracing::warn!(error = %err, "rollback after failed import also failed");
    } else {
        tracing::warn!("import failed; staged changes rolled back");
    }
}
