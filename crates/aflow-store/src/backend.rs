//! # Whole-Table Backends
//!
//! The remote backing store of the legacy deployment is a spreadsheet:
//! the only operations it supports are "read the whole table" and
//! "replace the whole table". `TableBackend` models exactly that, with no
//! row-level transactions, no locking, and no version token.
//!
//! `JsonTableBackend` is the file connector (a JSON array standing in for
//! the spreadsheet). `MemoryTableBackend` is a shared in-memory table used
//! by tests to model several sessions racing against one remote table.
//!
//! For the upgrade path with per-key atomicity, see `keyed.rs`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use aflow_core::AnswerRecord;

use crate::error::StoreError;

/// A remote table supporting only wholesale read and wholesale replace.
pub trait TableBackend {
    /// Read the entire current table.
    fn read_table(&self) -> Result<Vec<AnswerRecord>, StoreError>;

    /// Replace the entire table.
    fn write_table(&mut self, records: &[AnswerRecord]) -> Result<(), StoreError>;
}

// ─── In-Memory Table ─────────────────────────────────────────────────

/// A shared in-memory table. Clones share the same underlying rows, the
/// way independent sessions share one remote spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableBackend {
    rows: Arc<Mutex<Vec<AnswerRecord>>>,
}

impl MemoryTableBackend {
    /// An empty shared table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared table seeded with rows.
    pub fn with_rows(rows: Vec<AnswerRecord>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }
}

impl TableBackend for MemoryTableBackend {
    fn read_table(&self) -> Result<Vec<AnswerRecord>, StoreError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("table lock poisoned")))?;
        Ok(rows.clone())
    }

    fn write_table(&mut self, records: &[AnswerRecord]) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("table lock poisoned")))?;
        *rows = records.to_vec();
        Ok(())
    }
}

// ─── JSON File Table ─────────────────────────────────────────────────

/// A JSON file holding the whole table as one array of flat records.
///
/// Deliberately weak, mirroring the spreadsheet it replaces: a write
/// replaces the file wholesale, and nothing prevents another process from
/// writing between this session's read and write.
#[derive(Debug, Clone)]
pub struct JsonTableBackend {
    path: PathBuf,
}

impl JsonTableBackend {
    /// Use the table stored at `path`. The file need not exist yet; a
    /// missing file reads as an empty table.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableBackend for JsonTableBackend {
    fn read_table(&self) -> Result<Vec<AnswerRecord>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "backing table absent, reading empty");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<AnswerRecord> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), rows = records.len(), "read backing table");
        Ok(records)
    }

    fn write_table(&mut self, records: &[AnswerRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), rows = records.len(), "replaced backing table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aflow_core::{AnswerResult, AuditorId, Branch, EmployeeId, StandardCode, Timestamp};

    fn record(employee: &str, question: &str) -> AnswerRecord {
        AnswerRecord {
            timestamp: Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
            branch: Branch::new("B1").unwrap(),
            employee_name: "Maria".to_string(),
            employee_id: EmployeeId::new(employee).unwrap(),
            standard_code: StandardCode::new("S1").unwrap(),
            question_text: question.to_string(),
            result: AnswerResult::Conformant,
            note: String::new(),
            auditor_name: "Ana".to_string(),
            auditor_id: AuditorId::new("AUD-1").unwrap(),
        }
    }

    #[test]
    fn test_memory_backend_clones_share_rows() {
        let mut a = MemoryTableBackend::new();
        let b = a.clone();
        a.write_table(&[record("E1", "Q1")]).unwrap();
        assert_eq!(b.read_table().unwrap().len(), 1);
    }

    #[test]
    fn test_json_backend_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonTableBackend::new(dir.path().join("absent.json"));
        assert!(backend.read_table().unwrap().is_empty());
    }

    #[test]
    fn test_json_backend_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonTableBackend::new(dir.path().join("table.json"));
        let rows = vec![record("E1", "Q1"), record("E2", "Q1")];
        backend.write_table(&rows).unwrap();
        assert_eq!(backend.read_table().unwrap(), rows);
    }

    #[test]
    fn test_json_backend_write_is_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonTableBackend::new(dir.path().join("table.json"));
        backend
            .write_table(&[record("E1", "Q1"), record("E2", "Q1")])
            .unwrap();
        backend.write_table(&[record("E3", "Q1")]).unwrap();
        let rows = backend.read_table().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id.as_str(), "E3");
    }

    #[test]
    fn test_json_backend_empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, "").unwrap();
        let backend = JsonTableBackend::new(path);
        assert!(backend.read_table().unwrap().is_empty());
    }

    #[test]
    fn test_json_backend_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(&path, "{not json").unwrap();
        let backend = JsonTableBackend::new(path);
        assert!(matches!(
            backend.read_table(),
            Err(StoreError::Serialization(_))
        ));
    }
}
