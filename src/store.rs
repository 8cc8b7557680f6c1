//! State-owning inventory store.
//!
//! `Inventory` owns the record collection and its durable mirror. It is
//! loaded once at startup and saved synchronously after every mutation. A
//! failed save leaves the in-memory collection as it was before the call.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::{ParseError, StoreError};
use crate::parser::{parse, parse_now};
use crate::record::InventoryRecord;
use crate::view::{VisibleRecord, visible};

/// Key under which the browser keeps the collection.
pub const STORAGE_KEY: &str = "inventoryItems";

/// Durable mirror of the record collection.
pub trait Storage {
    /// Read the persisted collection. Nothing stored yet is an empty
    /// collection, not an error.
    fn load(&self) -> Result<Vec<InventoryRecord>, StoreError>;

    /// Replace the persisted collection.
    fn save(&self, records: &[InventoryRecord]) -> Result<(), StoreError>;
}

/// Keeps the serialized collection in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    json: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved JSON, if any.
    pub fn snapshot(&self) -> Option<String> {
        self.json.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        match self.json.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[InventoryRecord]) -> Result<(), StoreError> {
        *self.json.borrow_mut() = Some(serde_json::to_string(records)?);
        Ok(())
    }
}

/// Keeps the collection as a JSON array in a file.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFile {
    fn load(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, records: &[InventoryRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Why a submission was not added.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The record collection, in insertion order, plus its storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory<S: Storage> {
    records: Vec<InventoryRecord>,
    storage: S,
}

impl<S: Storage> Inventory<S> {
    /// Load the persisted collection from `storage`.
    pub fn load(storage: S) -> Result<Self, StoreError> {
        let records = storage.load()?;
        check_invariants(&records)?;
        tracing::debug!(count = records.len(), "loaded inventory");
        Ok(Self { records, storage })
    }

    /// Start from an empty collection without reading `storage`.
    pub fn empty(storage: S) -> Self {
        Self {
            records: Vec::new(),
            storage,
        }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: Uuid) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Records matching `search`, soonest expiring first.
    pub fn visible(&self, search: &str) -> Vec<VisibleRecord<'_>> {
        visible(&self.records, search)
    }

    /// Append records after the existing ones.
    pub fn add(&mut self, records: Vec<InventoryRecord>) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut next = self.records.clone();
        let added = records.len();
        next.extend(records);
        self.commit(next)?;
        tracing::info!(added, total = self.records.len(), "added records");
        Ok(())
    }

    /// Parse `raw` against `now` and add the result. Any parse error leaves
    /// the collection untouched.
    pub fn submit(&mut self, raw: &str, now: NaiveDateTime) -> Result<usize, SubmitError> {
        let records = parse(raw, now)?;
        let count = records.len();
        self.add(records)?;
        Ok(count)
    }

    /// `submit` against the local wall clock.
    pub fn submit_now(&mut self, raw: &str) -> Result<usize, SubmitError> {
        let records = parse_now(raw)?;
        let count = records.len();
        self.add(records)?;
        Ok(count)
    }

    /// Remove the record with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(pos) = self.records.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };
        let mut next = self.records.clone();
        next.remove(pos);
        self.commit(next)?;
        tracing::info!(%id, "deleted record");
        Ok(true)
    }

    /// Remove every record. Callers confirm with the user first.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(Vec::new())?;
        tracing::info!("cleared inventory");
        Ok(())
    }

    fn commit(&mut self, next: Vec<InventoryRecord>) -> Result<(), StoreError> {
        if let Err(e) = self.storage.save(&next) {
            tracing::warn!(error = %e, "failed to save inventory");
            return Err(e);
        }
        self.records = next;
        Ok(())
    }
}

/// Reject a loaded collection whose totals disagree with their quantities
/// or that holds the same id twice.
fn check_invariants(records: &[InventoryRecord]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let expected =
            u64::from(record.quantity_per_unit()) * u64::from(record.unit_count());
        if record.total_quantity() != expected {
            return Err(StoreError::Corrupt(format!(
                "record {} has total {} but {}x{} = {expected}",
                record.id(),
                record.total_quantity(),
                record.quantity_per_unit(),
                record.unit_count(),
            )));
        }
        if !seen.insert(record.id()) {
            return Err(StoreError::Corrupt(format!(
                "id {} appears more than once",
                record.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    /// Storage whose saves always fail.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn load(&self) -> Result<Vec<InventoryRecord>, StoreError> {
            Ok(Vec::new())
        }

        fn save(&self, _records: &[InventoryRecord]) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_submit_appends_in_order() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit("1x1 a (01/06/25)", now()).unwrap();
        let n = inv
            .submit("2x2 b (01/02/25)\n3x3 c (01/03/25)", now())
            .unwrap();
        assert_eq!(n, 2);
        let names: Vec<&str> = inv.records().iter().map(|r| r.product_name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_submit_is_all_or_nothing() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit("1x1 a (01/06/25)", now()).unwrap();

        let err = inv
            .submit("2x2 b (01/02/25)\nnot a batch line", now())
            .unwrap_err();
        match err {
            SubmitError::Parse(e) => assert_eq!(e.line(), Some("not a batch line")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_submit_empty_input() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        let err = inv.submit("   ", now()).unwrap_err();
        assert!(matches!(err, SubmitError::Parse(ParseError::EmptyInput)));
        assert!(inv.is_empty());
        assert!(inv.storage().snapshot().is_none());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit("1x1 a (01/06/25)\n1x1 b (01/06/25)\n1x1 c (01/06/25)", now())
            .unwrap();
        let ids: Vec<Uuid> = inv.records().iter().map(|r| r.id()).collect();

        assert!(inv.delete(ids[1]).unwrap());
        let remaining: Vec<Uuid> = inv.records().iter().map(|r| r.id()).collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);

        assert!(!inv.delete(ids[1]).unwrap());
        assert_eq!(inv.len(), 2);
    }

    /// Storage preloaded with `json` as if a previous session saved it.
    fn stored(json: serde_json::Value) -> MemoryStorage {
        let storage = MemoryStorage::new();
        *storage.json.borrow_mut() = Some(json.to_string());
        storage
    }

    fn saved_records(raw: &str) -> serde_json::Value {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit(raw, now()).unwrap();
        serde_json::to_value(inv.records()).unwrap()
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let mut json = saved_records("1x1 a (01/06/25)");
        let copy = json[0].clone();
        json.as_array_mut().unwrap().push(copy);

        let err = Inventory::load(stored(json)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "{err}");
    }

    #[test]
    fn test_load_rejects_mismatched_total() {
        let mut json = saved_records("130x24 speed 250 (02/06/26)");
        json[0]["totalQuantity"] = serde_json::json!(999);

        let err = Inventory::load(stored(json)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "{err}");
    }

    #[test]
    fn test_load_accepts_consistent_records() {
        let json = saved_records("130x24 speed 250 (02/06/26)\n5x12 agua (14/08/26)");
        let inv = Inventory::load(stored(json)).unwrap();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.records()[0].total_quantity(), 3120);
    }

    #[test]
    fn test_delete_removes_one_even_with_equal_entries() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit("1x1 a (01/06/25)\n1x1 a (01/06/25)", now()).unwrap();
        let first = inv.records()[0].id();
        let second = inv.records()[1].id();

        assert!(inv.delete(first).unwrap());
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.records()[0].id(), second);
    }

    #[test]
    fn test_submit_now_adds_and_rejects_like_submit() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        assert_eq!(inv.submit_now("1x1 a (01/06/25)\n2x3 b (01/06/99)").unwrap(), 2);
        assert_eq!(inv.records()[1].total_quantity(), 6);
        assert!(inv.records()[1].days_remaining() > 0);

        let err = inv.submit_now("1x1 c (01/06/25)\nbad").unwrap_err();
        assert!(matches!(err, SubmitError::Parse(ParseError::Format { line_number: 2, .. })));
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit("1x1 a (01/06/25)\n1x1 b (01/06/25)", now()).unwrap();
        inv.clear().unwrap();
        assert!(inv.is_empty());
        assert_eq!(inv.storage().snapshot().as_deref(), Some("[]"));
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut inv = Inventory::empty(MemoryStorage::new());
        inv.submit("1x1 a (01/06/25)\n1x1 b (01/06/25)", now()).unwrap();
        let id = inv.records()[0].id();
        inv.delete(id).unwrap();

        let reloaded = inv.storage().load().unwrap();
        assert_eq!(reloaded, inv.records());
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let mut inv = Inventory::empty(BrokenStorage);
        let err = inv.submit("1x1 a (01/06/25)", now()).unwrap_err();
        assert!(matches!(err, SubmitError::Store(StoreError::Backend(_))));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("inventario.json");

        let mut inv = Inventory::load(JsonFile::new(&path)).unwrap();
        assert!(inv.is_empty());
        inv.submit("130x24 speed 250 (02/06/26)", now()).unwrap();

        let reloaded = Inventory::load(JsonFile::new(&path)).unwrap();
        assert_eq!(reloaded.records(), inv.records());
        assert_eq!(reloaded.records()[0].total_quantity(), 3120);
    }

    #[test]
    fn test_json_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Inventory::load(JsonFile::new(&path)),
            Err(StoreError::Serde(_))
        ));
    }
}
