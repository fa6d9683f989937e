//! # Keyed Backend — Atomic Conditional Upserts
//!
//! The recommended replacement for the whole-table protocol: a backend
//! addressed by `ResponseKey` with compare-and-swap semantics per key.
//!
//! A writer states what it believes the current record for a key is
//! (`None` for "absent"). If the backend disagrees, the write is rejected
//! with `StoreError::WriteConflict` instead of silently overwriting, which
//! closes the lost-update window the whole-table protocol leaves open.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use aflow_core::{AnswerRecord, ResponseKey};

use crate::error::StoreError;

/// A keyed store with atomic conditional upserts.
pub trait KeyedBackend {
    /// The current record for a key, if any.
    fn get(&self, key: &ResponseKey) -> Result<Option<AnswerRecord>, StoreError>;

    /// Atomically replace the record for `key`, but only if the current
    /// record equals `expected` (`None` meaning the key is absent).
    ///
    /// # Errors
    ///
    /// `StoreError::WriteConflict` when the current record differs from
    /// `expected`; the backend is unchanged and the caller should re-read
    /// and reconcile.
    fn compare_and_upsert(
        &mut self,
        key: &ResponseKey,
        expected: Option<&AnswerRecord>,
        record: AnswerRecord,
    ) -> Result<(), StoreError>;

    /// All current records in key order.
    fn read_all(&self) -> Result<Vec<AnswerRecord>, StoreError>;
}

/// An in-memory keyed backend. Clones share the same underlying map, the
/// way independent sessions would share one remote store.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyedBackend {
    map: Arc<Mutex<BTreeMap<ResponseKey, AnswerRecord>>>,
}

impl MemoryKeyedBackend {
    /// An empty shared backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<ResponseKey, AnswerRecord>>, StoreError> {
        self.map
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("keyed store lock poisoned")))
    }
}

impl KeyedBackend for MemoryKeyedBackend {
    fn get(&self, key: &ResponseKey) -> Result<Option<AnswerRecord>, StoreError> {
        Ok(self.locked()?.get(key).cloned())
    }

    fn compare_and_upsert(
        &mut self,
        key: &ResponseKey,
        expected: Option<&AnswerRecord>,
        record: AnswerRecord,
    ) -> Result<(), StoreError> {
        let mut map = self.locked()?;
        let current = map.get(key);
        if current != expected {
            return Err(StoreError::WriteConflict { key: key.clone() });
        }
        map.insert(key.clone(), record);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<AnswerRecord>, StoreError> {
        Ok(self.locked()?.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aflow_core::{AnswerResult, AuditorId, Branch, EmployeeId, StandardCode, Timestamp};

    fn record(result: AnswerResult, note: &str) -> AnswerRecord {
        AnswerRecord {
            timestamp: Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
            branch: Branch::new("B1").unwrap(),
            employee_name: "Maria".to_string(),
            employee_id: EmployeeId::new("E1").unwrap(),
            standard_code: StandardCode::new("S1").unwrap(),
            question_text: "Q1".to_string(),
            result,
            note: note.to_string(),
            auditor_name: "Ana".to_string(),
            auditor_id: AuditorId::new("AUD-1").unwrap(),
        }
    }

    #[test]
    fn test_cas_insert_when_absent() {
        let mut backend = MemoryKeyedBackend::new();
        let r = record(AnswerResult::Conformant, "");
        backend.compare_and_upsert(&r.key(), None, r.clone()).unwrap();
        assert_eq!(backend.get(&r.key()).unwrap(), Some(r));
    }

    #[test]
    fn test_cas_replace_with_correct_expectation() {
        let mut backend = MemoryKeyedBackend::new();
        let v1 = record(AnswerResult::Conformant, "");
        let v2 = record(AnswerResult::NonConformant, "gap");
        backend.compare_and_upsert(&v1.key(), None, v1.clone()).unwrap();
        backend
            .compare_and_upsert(&v1.key(), Some(&v1), v2.clone())
            .unwrap();
        assert_eq!(backend.get(&v2.key()).unwrap(), Some(v2));
    }

    #[test]
    fn test_cas_stale_expectation_rejected() {
        // Two sessions read the same state, then both try to write: the
        // second writer's expectation is stale and is rejected instead of
        // silently clobbering the first write.
        let shared = MemoryKeyedBackend::new();
        let mut session_a = shared.clone();
        let mut session_b = shared.clone();

        let base = record(AnswerResult::Conformant, "");
        session_a
            .compare_and_upsert(&base.key(), None, base.clone())
            .unwrap();

        let a_view = session_a.get(&base.key()).unwrap();
        let b_view = session_b.get(&base.key()).unwrap();
        assert_eq!(a_view, b_view);

        let a_write = record(AnswerResult::NonConformant, "missing cert");
        session_a
            .compare_and_upsert(&base.key(), a_view.as_ref(), a_write.clone())
            .unwrap();

        let b_write = record(AnswerResult::NotApplicable, "");
        let err = session_b
            .compare_and_upsert(&base.key(), b_view.as_ref(), b_write)
            .unwrap_err();
        assert!(matches!(err, StoreError::WriteConflict { .. }));

        // Session A's write survived.
        assert_eq!(shared.get(&base.key()).unwrap(), Some(a_write));
    }

    #[test]
    fn test_cas_expecting_absent_on_present_key_rejected() {
        let mut backend = MemoryKeyedBackend::new();
        let r = record(AnswerResult::Conformant, "");
        backend.compare_and_upsert(&r.key(), None, r.clone()).unwrap();
        let err = backend
            .compare_and_upsert(&r.key(), None, record(AnswerResult::NotApplicable, ""))
            .unwrap_err();
        assert!(matches!(err, StoreError::WriteConflict { .. }));
    }

    #[test]
    fn test_read_all_in_key_order() {
        let mut backend = MemoryKeyedBackend::new();
        let mut r2 = record(AnswerResult::Conformant, "");
        r2.employee_id = EmployeeId::new("E2").unwrap();
        let r1 = record(AnswerResult::Conformant, "");
        backend.compare_and_upsert(&r2.key(), None, r2.clone()).unwrap();
        backend.compare_and_upsert(&r1.key(), None, r1.clone()).unwrap();
        let all = backend.read_all().unwrap();
        assert_eq!(all, vec![r1, r2]);
    }
}
