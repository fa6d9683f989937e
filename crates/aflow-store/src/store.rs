//! # Response Store — Upsert and Merge Semantics
//!
//! The central data structure: a map from `ResponseKey` to the single
//! current `AnswerRecord` for that key.
//!
//! ## Invariants
//!
//! - At most one record per composite key at any time. Upsert replaces;
//!   no history is retained for a key.
//! - `bulk_merge` is deterministic for a fixed ordered source list:
//!   sources are concatenated in order and the **last occurrence** of a
//!   key wins, regardless of how rows are ordered within one source
//!   relative to rows of other sources.
//! - `conflict_detect` runs on the pre-dedup concatenation and is
//!   informational only; it never blocks a merge or a write.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use aflow_core::{AnswerRecord, ResponseKey};

/// The keyed answer store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseStore {
    records: BTreeMap<ResponseKey, AnswerRecord>,
}

impl ResponseStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record with the same
    /// composite key.
    pub fn upsert(&mut self, record: AnswerRecord) {
        self.records.insert(record.key(), record);
    }

    /// Merge ordered sources into the store. The store's current contents
    /// count as the earliest source: every incoming record overwrites on
    /// key collision, so later sources win. Within one source, later rows
    /// win over earlier rows sharing a key.
    pub fn bulk_merge(&mut self, sources: impl IntoIterator<Item = Vec<AnswerRecord>>) {
        for source in sources {
            for record in source {
                self.upsert(record);
            }
        }
    }

    /// Detect conflicting keys across raw (pre-dedup) sources: keys that
    /// appear more than once with differing `(result, note)` payloads.
    /// With three or more colliding occurrences the key is still reported
    /// exactly once. Informational only.
    pub fn conflict_detect(raw_sources: &[Vec<AnswerRecord>]) -> BTreeSet<ResponseKey> {
        let mut first_seen: BTreeMap<ResponseKey, &AnswerRecord> = BTreeMap::new();
        let mut conflicts = BTreeSet::new();
        for record in raw_sources.iter().flatten() {
            match first_seen.entry(record.key()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(existing) => {
                    if !existing.get().same_payload(record) {
                        conflicts.insert(record.key());
                    }
                }
            }
        }
        conflicts
    }

    /// Records matching an arbitrary predicate, in key order.
    pub fn query<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a AnswerRecord>
    where
        P: Fn(&AnswerRecord) -> bool + 'a,
    {
        self.records.values().filter(move |r| predicate(r))
    }

    /// Look up the current record for a key.
    pub fn get(&self, key: &ResponseKey) -> Option<&AnswerRecord> {
        self.records.get(key)
    }

    /// All records in key order.
    pub fn records(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.records.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wholesale reset. The only deletion path; records are never removed
    /// individually.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aflow_core::{AnswerResult, AuditorId, Branch, EmployeeId, StandardCode, Timestamp};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn record(employee: &str, standard: &str, question: &str, result: AnswerResult, note: &str) -> AnswerRecord {
        AnswerRecord {
            timestamp: Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
            branch: Branch::new("B1").unwrap(),
            employee_name: "Maria".to_string(),
            employee_id: EmployeeId::new(employee).unwrap(),
            standard_code: StandardCode::new(standard).unwrap(),
            question_text: question.to_string(),
            result,
            note: note.to_string(),
            auditor_name: "Ana".to_string(),
            auditor_id: AuditorId::new("AUD-1").unwrap(),
        }
    }

    #[test]
    fn test_upsert_idempotent() {
        let mut store = ResponseStore::new();
        let r = record("E1", "S1", "Q1", AnswerResult::Conformant, "");
        store.upsert(r.clone());
        store.upsert(r.clone());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&r.key()), Some(&r));
    }

    #[test]
    fn test_upsert_replaces_no_history() {
        let mut store = ResponseStore::new();
        store.upsert(record("E1", "S1", "Q1", AnswerResult::Conformant, ""));
        let replacement = record("E1", "S1", "Q1", AnswerResult::NonConformant, "expired cert");
        store.upsert(replacement.clone());
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&replacement.key()).unwrap().result,
            AnswerResult::NonConformant
        );
    }

    #[test]
    fn test_bulk_merge_later_source_wins() {
        let mut store = ResponseStore::new();
        let file_a = vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")];
        let file_b = vec![record("E1", "S1", "Q1", AnswerResult::NonConformant, "gap")];
        store.bulk_merge([file_a, file_b]);
        assert_eq!(store.len(), 1);
        let kept = store.records().next().unwrap();
        assert_eq!(kept.result, AnswerResult::NonConformant);
    }

    #[test]
    fn test_bulk_merge_store_contents_are_earliest_source() {
        let mut store = ResponseStore::new();
        store.upsert(record("E1", "S1", "Q1", AnswerResult::Conformant, ""));
        store.bulk_merge([vec![record("E1", "S1", "Q1", AnswerResult::NotApplicable, "")]]);
        assert_eq!(
            store.records().next().unwrap().result,
            AnswerResult::NotApplicable
        );
    }

    #[test]
    fn test_bulk_merge_last_row_wins_within_one_source() {
        let mut store = ResponseStore::new();
        let source = vec![
            record("E1", "S1", "Q1", AnswerResult::Conformant, ""),
            record("E1", "S1", "Q1", AnswerResult::NotApplicable, ""),
        ];
        store.bulk_merge([source]);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.records().next().unwrap().result,
            AnswerResult::NotApplicable
        );
    }

    #[test]
    fn test_conflict_detect_differing_payloads() {
        let sources = vec![
            vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")],
            vec![record("E1", "S1", "Q1", AnswerResult::NonConformant, "gap")],
        ];
        let conflicts = ResponseStore::conflict_detect(&sources);
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts.contains(&sources[0][0].key()));
    }

    #[test]
    fn test_conflict_detect_identical_payloads_not_conflicting() {
        // Same payload imported twice (e.g. the same file uploaded twice)
        // is a duplicate, not a conflict.
        let sources = vec![
            vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")],
            vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")],
        ];
        assert!(ResponseStore::conflict_detect(&sources).is_empty());
    }

    #[test]
    fn test_conflict_detect_three_way_reports_once() {
        let sources = vec![
            vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")],
            vec![record("E1", "S1", "Q1", AnswerResult::NonConformant, "a")],
            vec![record("E1", "S1", "Q1", AnswerResult::NotApplicable, "")],
        ];
        let conflicts = ResponseStore::conflict_detect(&sources);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_conflict_detect_ignores_auditor_and_timestamp() {
        let mut second = record("E1", "S1", "Q1", AnswerResult::Conformant, "");
        second.auditor_name = "Outro".to_string();
        second.timestamp = Timestamp::parse("2026-04-01T09:00:00Z").unwrap();
        let sources = vec![
            vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")],
            vec![second],
        ];
        assert!(ResponseStore::conflict_detect(&sources).is_empty());
    }

    #[test]
    fn test_query_by_attributes() {
        let mut store = ResponseStore::new();
        store.upsert(record("E1", "S1", "Q1", AnswerResult::Conformant, ""));
        store.upsert(record("E1", "S2", "Q2", AnswerResult::Conformant, ""));
        store.upsert(record("E2", "S1", "Q1", AnswerResult::Conformant, ""));
        let e1 = EmployeeId::new("E1").unwrap();
        assert_eq!(store.query(|r| r.employee_id == e1).count(), 2);
        let s1 = StandardCode::new("S1").unwrap();
        assert_eq!(store.query(|r| r.standard_code == s1).count(), 2);
    }

    #[test]
    fn test_clear_is_wholesale() {
        let mut store = ResponseStore::new();
        store.upsert(record("E1", "S1", "Q1", AnswerResult::Conformant, ""));
        store.upsert(record("E2", "S1", "Q1", AnswerResult::Conformant, ""));
        store.clear();
        assert!(store.is_empty());
    }

    // ── Scenario B (import history files A then B) ───────────────────

    #[test]
    fn test_import_conflicting_history_files() {
        let file_a = vec![record("E1", "S1", "Q1", AnswerResult::Conformant, "")];
        let file_b = vec![record("E1", "S1", "Q1", AnswerResult::NonConformant, "gap")];
        let sources = vec![file_a, file_b];

        let conflicts = ResponseStore::conflict_detect(&sources);
        assert_eq!(conflicts.len(), 1);

        let mut store = ResponseStore::new();
        store.bulk_merge(sources);
        let kept = store.records().next().unwrap();
        assert_eq!(kept.result, AnswerResult::NonConformant);
    }

    // ── Merge determinism (property) ─────────────────────────────────

    fn arb_result() -> impl Strategy<Value = AnswerResult> {
        prop_oneof![
            Just(AnswerResult::Conformant),
            Just(AnswerResult::NonConformant),
            Just(AnswerResult::NotApplicable),
        ]
    }

    prop_compose! {
        fn arb_record()(
            employee in "[A-C]",
            standard in "[S-T]",
            question in "[QR]",
            result in arb_result(),
        ) -> AnswerRecord {
            record(&employee, &standard, &question, result, "n")
        }
    }

    proptest! {
        /// For any two sources, every key present in the second source
        /// ends up with the second source's (last) value, regardless of
        /// how rows are ordered inside the first source.
        #[test]
        fn prop_last_source_wins(
            first in proptest::collection::vec(arb_record(), 0..8),
            second in proptest::collection::vec(arb_record(), 0..8),
        ) {
            let mut store = ResponseStore::new();
            store.bulk_merge([first.clone(), second.clone()]);

            for record in second.iter().rev() {
                // The last occurrence of each key in `second` is the
                // winner for that key.
                let key = record.key();
                let winner = second.iter().rev().find(|r| r.key() == key).unwrap();
                prop_assert_eq!(store.get(&key).unwrap(), winner);
            }

            // Keys only in `first` keep their last `first` occurrence.
            for record in &first {
                let key = record.key();
                if !second.iter().any(|r| r.key() == key) {
                    let winner = first.iter().rev().find(|r| r.key() == key).unwrap();
                    prop_assert_eq!(store.get(&key).unwrap(), winner);
                }
            }
        }

        /// Merging is deterministic: the same ordered sources always
        /// produce the same store contents.
        #[test]
        fn prop_merge_deterministic(
            sources in proptest::collection::vec(
                proptest::collection::vec(arb_record(), 0..6), 0..4),
        ) {
            let mut a = ResponseStore::new();
            let mut b = ResponseStore::new();
            a.bulk_merge(sources.clone());
            b.bulk_merge(sources);
            let left: Vec<_> = a.records().collect();
            let right: Vec<_> = b.records().collect();
            prop_assert_eq!(left, right);
        }
    }
}
