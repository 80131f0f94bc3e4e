//! The belief base — an append-only, name-indexed event log.
//!
//! Beliefs carry no obvious primary key beyond their name, so the base
//! buckets the log by name: searches that constrain the name touch one
//! bucket, everything else scans. The whole structure sits behind one
//! coarse lock; reads copy out so results are immune to later mutation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::belief::Belief;
use crate::error::{MemoryError, MemoryResult, ValidationError};
use crate::pattern::BeliefPattern;
use crate::percept::Percept;
use crate::store::snapshot;
use crate::time::TimeFilter;

fn lock_err(context: &'static str) -> MemoryError {
    MemoryError::internal(format!("poisoned lock: {context}"))
}

/// Thread-safe, name-bucketed belief log.
///
/// The log never deduplicates: recording the same fact twice yields two
/// beliefs. Search results within one bucket preserve insertion order;
/// ordering across buckets is unspecified.
#[derive(Debug, Default)]
pub struct BeliefBase {
    buckets: RwLock<HashMap<String, Vec<Belief>>>,
}

impl BeliefBase {
    /// Creates an empty belief base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new belief with `recorded_at` set to now.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBeliefName`] if `name` is empty.
    pub fn add(&self, name: impl Into<String>, args: Vec<String>) -> MemoryResult<()> {
        self.add_record(Belief::new(name, args))
    }

    /// Appends an already-constructed belief, keeping its creation instant.
    ///
    /// Used by percept promotion and by producers that stamp their own
    /// observation times.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBeliefName`] if the belief's name is
    /// empty.
    pub fn add_record(&self, belief: Belief) -> MemoryResult<()> {
        if belief.name.is_empty() {
            return Err(ValidationError::EmptyBeliefName.into());
        }
        let mut buckets = self.buckets.write().map_err(|_| lock_err("beliefs.add"))?;
        buckets
            .entry(belief.name.clone())
            .or_default()
            .push(belief);
        Ok(())
    }

    /// Copies a percept into the log as a durable belief.
    ///
    /// The source percept is unaffected; see [`Belief::promoted_from`] for
    /// the promoted shape.
    ///
    /// # Errors
    ///
    /// Propagates [`BeliefBase::add_record`] failures.
    pub fn add_promoted(&self, percept: &Percept) -> MemoryResult<()> {
        self.add_record(Belief::promoted_from(percept))
    }

    /// Returns copies of every belief matching `pattern`.
    ///
    /// An unconstrained pattern returns the entire log without running the
    /// matcher. A concrete name narrows the scan to one bucket; a wildcard
    /// name with argument slots scans every bucket.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn search(&self, pattern: &BeliefPattern) -> MemoryResult<Vec<Belief>> {
        let buckets = self.buckets.read().map_err(|_| lock_err("beliefs.search"))?;

        if pattern.is_unconstrained() {
            return Ok(buckets.values().flatten().cloned().collect());
        }

        let results = match pattern.name_slot() {
            Some(name) => buckets
                .get(name)
                .map(|bucket| {
                    bucket
                        .iter()
                        .filter(|belief| pattern.matches(belief))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            None => buckets
                .values()
                .flatten()
                .filter(|belief| pattern.matches(belief))
                .cloned()
                .collect(),
        };
        Ok(results)
    }

    /// As [`BeliefBase::search`], further filtered by creation instant.
    ///
    /// Built on top of the pattern search rather than a secondary time
    /// index; belief logs are not expected to reach sizes where that
    /// matters, and the contract here would survive adding one.
    ///
    /// # Errors
    ///
    /// Propagates [`BeliefBase::search`] failures.
    pub fn search_in_window(
        &self,
        pattern: &BeliefPattern,
        filter: TimeFilter,
        threshold: DateTime<Utc>,
    ) -> MemoryResult<Vec<Belief>> {
        let mut results = self.search(pattern)?;
        results.retain(|belief| filter.admits(belief.recorded_at, threshold));
        Ok(results)
    }

    /// Removes every belief matching `pattern`, returning the removed count.
    ///
    /// An unconstrained pattern clears the entire store. That shortcut is
    /// deliberate, inherited API behavior: "forget everything" is spelled
    /// as a delete with no constraints.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn delete(&self, pattern: &BeliefPattern) -> MemoryResult<usize> {
        let mut buckets = self.buckets.write().map_err(|_| lock_err("beliefs.delete"))?;

        let removed = if pattern.is_unconstrained() {
            let total = buckets.values().map(Vec::len).sum();
            buckets.clear();
            total
        } else {
            let mut removed = 0usize;
            match pattern.name_slot() {
                Some(name) => {
                    if let Some(bucket) = buckets.get_mut(name) {
                        let before = bucket.len();
                        bucket.retain(|belief| !pattern.matches(belief));
                        removed = before - bucket.len();
                    }
                }
                None => {
                    for bucket in buckets.values_mut() {
                        let before = bucket.len();
                        bucket.retain(|belief| !pattern.matches(belief));
                        removed += before - bucket.len();
                    }
                }
            }
            buckets.retain(|_, bucket| !bucket.is_empty());
            removed
        };

        debug!(removed, "deleted beliefs");
        Ok(removed)
    }

    /// Unconditionally empties the log, returning the removed count.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn clear(&self) -> MemoryResult<usize> {
        let mut buckets = self.buckets.write().map_err(|_| lock_err("beliefs.clear"))?;
        let total = buckets.values().map(Vec::len).sum();
        buckets.clear();
        debug!(removed = total, "cleared belief base");
        Ok(total)
    }

    /// Number of beliefs currently in the log.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn len(&self) -> MemoryResult<usize> {
        let buckets = self.buckets.read().map_err(|_| lock_err("beliefs.len"))?;
        Ok(buckets.values().map(Vec::len).sum())
    }

    /// True if the log holds no beliefs.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::Internal`] if the store lock is poisoned.
    pub fn is_empty(&self) -> MemoryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Serializes the entire log to `path`.
    ///
    /// The bucketed structure is copied out under the read lock and written
    /// outside it; save is the one deliberately slow operation here and
    /// must not stall concurrent readers and writers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SnapshotError`] on I/O failure.
    pub fn save_to(&self, path: impl AsRef<Path>) -> MemoryResult<()> {
        let buckets = {
            let guard = self.buckets.read().map_err(|_| lock_err("beliefs.save"))?;
            guard.clone()
        };
        snapshot::save(&buckets, path.as_ref())?;
        Ok(())
    }

    /// Replaces the log with the snapshot at `path`.
    ///
    /// Restore is all-or-nothing: the file is read and decoded completely
    /// before the in-memory log is touched, so any failure leaves prior
    /// contents intact. Every restored belief's `recorded_at` is reset to
    /// the restore-time now — reloaded history is deliberately treated as
    /// "recalled just now" and original instants are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SnapshotError`] on I/O failure or a corrupt
    /// snapshot.
    pub fn restore_from(&self, path: impl AsRef<Path>) -> MemoryResult<()> {
        let restored = snapshot::load(path.as_ref(), Utc::now())?;
        let mut buckets = self
            .buckets
            .write()
            .map_err(|_| lock_err("beliefs.restore"))?;
        *buckets = restored;
        Ok(())
    }
}
