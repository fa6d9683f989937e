//! # Import Engine — Bootstrap and Read-Modify-Write Persistence
//!
//! Combines session memory, uploaded legacy files, and the remote backing
//! table into the session's `ResponseStore`, and persists new writes back
//! to the remote table.
//!
//! ## Write protocol (whole-table backends)
//!
//! 1. Re-read the current remote table fresh (never the session's cache).
//! 2. Key every remote row and every newly submitted row.
//! 3. Drop remote rows whose key collides with a new row.
//! 4. Concatenate survivors + new rows.
//! 5. Write the entire table back, replacing it wholesale.
//!
//! ## Known limitation
//!
//! The protocol is optimistic and non-transactional. Two sessions
//! submitting overlapping edits concurrently can lose one party's update:
//! the last writer to complete step 5 wins on colliding keys. Even edits
//! on disjoint key sets survive an interleaved writer only because each
//! writer re-reads at step 1; there is no locking and no version token,
//! so an interleaving between another session's step 1 and step 5 is
//! still lost. `tests` pins this behavior. The `KeyedBackend` in
//! `keyed.rs` is the upgrade path that rejects such races per key.

use std::collections::BTreeSet;

use tracing::{info, warn};

use aflow_core::{AnswerRecord, ResponseKey};

use crate::backend::TableBackend;
use crate::error::StoreError;
use crate::store::ResponseStore;

/// Bootstraps a session store and persists submissions to a remote table.
#[derive(Debug)]
pub struct ImportEngine<B: TableBackend> {
    backend: B,
}

impl<B: TableBackend> ImportEngine<B> {
    /// Wrap a backing table.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Populate an empty session store from the available sources, in the
    /// canonical order: uploaded legacy files first (in upload order),
    /// then the remote backing table, which is therefore authoritative on
    /// colliding keys at bootstrap time.
    ///
    /// A store that already holds session memory is left untouched.
    ///
    /// Returns the conflicting keys found across the raw sources;
    /// informational only, the merge always proceeds.
    pub fn bootstrap(
        &self,
        store: &mut ResponseStore,
        legacy_files: Vec<Vec<AnswerRecord>>,
    ) -> Result<BTreeSet<ResponseKey>, StoreError> {
        if !store.is_empty() {
            return Ok(BTreeSet::new());
        }

        let remote = self.backend.read_table()?;
        let mut sources = legacy_files;
        sources.push(remote);

        let conflicts = ResponseStore::conflict_detect(&sources);
        for key in &conflicts {
            warn!(%key, "conflicting answers across import sources; later source wins");
        }

        store.bulk_merge(sources);
        info!(rows = store.len(), "bootstrapped session store");
        Ok(conflicts)
    }

    /// Persist newly submitted records to the remote table under the
    /// whole-table read-modify-write protocol.
    ///
    /// # Errors
    ///
    /// Any backend failure is returned as-is. The caller keeps its local
    /// in-memory copy of the attempted records, so a manual re-submit can
    /// retry; there is no automatic retry.
    pub fn persist(&mut self, new_records: &[AnswerRecord]) -> Result<(), StoreError> {
        if new_records.is_empty() {
            return Ok(());
        }

        // Step 1: fresh read, never the session cache.
        let remote = self.backend.read_table()?;
        let remote_len = remote.len();

        // Steps 2-3: drop remote rows colliding with a new key.
        let new_keys: BTreeSet<ResponseKey> = new_records.iter().map(|r| r.key()).collect();
        let mut table: Vec<AnswerRecord> = remote
            .into_iter()
            .filter(|row| !new_keys.contains(&row.key()))
            .collect();
        let survivors = table.len();
        let replaced = remote_len - survivors;

        // Step 4: survivors + new rows.
        table.extend_from_slice(new_records);

        // Step 5: wholesale replace.
        self.backend.write_table(&table)?;
        info!(
            written = table.len(),
            new = new_records.len(),
            survivors,
            replaced,
            "persisted submissions to backing table"
        );
        Ok(())
    }
}
