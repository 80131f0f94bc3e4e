//! The percept base — a current-state table with two lookup paths.
//!
//! Queries legitimately arrive keyed by either half of the dual key ("all
//! percepts of kind X" vs "all percepts about object Y"), so the table
//! maintains a primary `kind -> object_id -> Percept` index and a
//! secondary `object_id -> kind -> Percept` mirror. Both live inside one
//! locked state value, and every logical mutation funnels through a single
//! apply routine, so no call site can update one index without the other.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{MemoryError, MemoryResult, ValidationError};
use crate::pattern::PerceptPattern;
use crate::percept::{Percept, PerceptBatch};

fn lock_err(context: &'static str) -> MemoryError {
    MemoryError::internal(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
struct PerceptState {
    by_kind: HashMap<String, HashMap<String, Percept>>,
    by_object: HashMap<String, HashMap<String, Percept>>,
}

impl PerceptState {
    /// The one place both indexes are written on insert/replace.
    fn apply_upsert(&mut self, percept: Percept) {
        self.by_kind
            .entry(percept.kind.clone())
            .or_default()
            .insert(percept.object_id.clone(), percept.clone());
        self.by_object
            .entry(percept.object_id.clone())
            .or_default()
            .insert(percept.kind.clone(), percept);
    }

    /// The one place both indexes are written on removal.
    fn apply_remove(&mut self, kind: &str, object_id: &str) {
        if let Some(bucket) = self.by_kind.get_mut(kind) {
            bucket.remove(object_id);
        }
        if let Some(bucket) = self.by_object.get_mut(object_id) {
            bucket.remove(kind);
        }
    }

    fn prune_empty_buckets(&mut self) {
        self.by_kind.retain(|_, bucket| !bucket.is_empty());
        self.by_object.retain(|_, bucket| !bucket.is_empty());
    }

    fn len(&self) -> usize {
        self.by_kind.values().map(HashMap::len).sum()
    }
}

fn validate(percept: &Percept) -> Result<(), ValidationError> {
    if percept.kind.is_empty() {
        return Err(ValidationError::EmptyPerceptKind);
    }
    if percept.object_id.is_empty() {
        return Err(ValidationError::EmptyObjectId);
    }
    Ok(())
}

/// Thread-safe dual-indexed table of latest-known world state.
///
/// The `(kind, object_id)` pair is unique at any instant: upserting an
/// existing key replaces the prior value. There is no percept history and
/// no persistence — percepts are re-derivable from live observation, so
/// losing them on restart is acceptable by design.
#[derive(Debug, Default)]
pub struct PerceptBase {
    state: RwLock<PerceptState>,
}

impl PerceptBase {
    /// Creates an empty percept base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the percept at its `(kind, object_id)` key.
    ///
    /// Both indexes are updated under one write lock, so concurrent
    /// readers observe either the old entry in both or the new entry in
    /// both.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the kind or object id is empty.
    pub fn upsert(&self, percept: Percept) -> MemoryResult<()> {
        validate(&percept)?;
        let mut state = self.state.write().map_err(|_| lock_err("percepts.upsert"))?;
        state.apply_upsert(percept);
        Ok(())
    }

    /// Applies a batch of upserts as one logical update.
    ///
    /// The lock is held across the whole batch; within the batch the last
    /// writer wins per key. Returns the number of percepts applied.
    ///
    /// # Errors
    ///
    /// Validates every percept before touching the state, so a bad record
    /// anywhere in the batch rejects the batch as a whole.
    pub fn upsert_batch(&self, batch: PerceptBatch) -> MemoryResult<usize> {
        for percept in batch.iter() {
            validate(percept)?;
        }
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("percepts.upsert_batch"))?;
        let applied = batch.len();
        for percept in batch {
            state.apply_upsert(percept);
        }
        Ok(applied)
    }

    /// Returns copies of every percept matching `pattern`.
    ///
    /// Key slots choose the access path: both given is a direct double
    /// lookup (zero or one candidate); one given scans that key's bucket;
    /// neither given scans the whole table — and if the pattern carries no
    /// argument slots either, the scan skips matching entirely.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn search(&self, pattern: &PerceptPattern) -> MemoryResult<Vec<Percept>> {
        let state = self.state.read().map_err(|_| lock_err("percepts.search"))?;

        let results = match (pattern.kind_slot(), pattern.object_slot()) {
            (Some(kind), Some(object_id)) => state
                .by_kind
                .get(kind)
                .and_then(|bucket| bucket.get(object_id))
                .filter(|percept| {
                    pattern.arg_slots().is_empty() || pattern.matches(percept)
                })
                .cloned()
                .into_iter()
                .collect(),
            (Some(kind), None) => scan_bucket(state.by_kind.get(kind), pattern),
            (None, Some(object_id)) => scan_bucket(state.by_object.get(object_id), pattern),
            (None, None) => {
                let all = state.by_kind.values().flat_map(HashMap::values);
                if pattern.arg_slots().is_empty() {
                    // Nothing constrains the scan; skip the matcher.
                    all.cloned().collect()
                } else {
                    all.filter(|percept| pattern.matches(percept))
                        .cloned()
                        .collect()
                }
            }
        };
        Ok(results)
    }

    /// Removes every percept matching `pattern`, returning the removed
    /// count.
    ///
    /// The deletion set is computed before any mutation, then removed from
    /// both indexes; emptied buckets are pruned from both afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn delete(&self, pattern: &PerceptPattern) -> MemoryResult<usize> {
        let mut state = self.state.write().map_err(|_| lock_err("percepts.delete"))?;

        let doomed: Vec<(String, String)> = state
            .by_kind
            .values()
            .flat_map(HashMap::values)
            .filter(|percept| pattern.matches(percept))
            .map(|percept| (percept.kind.clone(), percept.object_id.clone()))
            .collect();

        for (kind, object_id) in &doomed {
            state.apply_remove(kind, object_id);
        }
        state.prune_empty_buckets();

        debug!(removed = doomed.len(), "deleted percepts");
        Ok(doomed.len())
    }

    /// Unconditionally empties both indexes, returning the removed count.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn clear(&self) -> MemoryResult<usize> {
        let mut state = self.state.write().map_err(|_| lock_err("percepts.clear"))?;
        let total = state.len();
        state.by_kind.clear();
        state.by_object.clear();
        debug!(removed = total, "cleared percept base");
        Ok(total)
    }

    /// Number of percepts currently stored.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn len(&self) -> MemoryResult<usize> {
        let state = self.state.read().map_err(|_| lock_err("percepts.len"))?;
        Ok(state.len())
    }

    /// True if no percepts are stored.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn is_empty(&self) -> MemoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn scan_bucket(
    bucket: Option<&HashMap<String, Percept>>,
    pattern: &PerceptPattern,
) -> Vec<Percept> {
    let Some(bucket) = bucket else {
        return Vec::new();
    };
    if pattern.arg_slots().is_empty() {
        bucket.values().cloned().collect()
    } else {
        bucket
            .values()
            .filter(|percept| pattern.matches(percept))
            .cloned()
            .collect()
    }
}
