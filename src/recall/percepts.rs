//! Recall façade over the percept table.

use std::sync::Arc;

use tracing::debug;

use crate::error::{MemoryError, MemoryResult};
use crate::pattern::PerceptPattern;
use crate::percept::{Percept, PerceptBatch};
use crate::store::{BeliefBase, PerceptBase};
use crate::time;

use super::{exactly_one, first, percept_row};

/// Stateless translation layer between flat-row callers and the
/// [`PerceptBase`].
///
/// Also holds the belief base so that observed state can be promoted into
/// durable memory ([`PerceptRecall::remember_that`]).
#[derive(Debug, Clone)]
pub struct PerceptRecall {
    percepts: Arc<PerceptBase>,
    beliefs: Arc<BeliefBase>,
}

impl PerceptRecall {
    /// Wraps shared percept and belief bases.
    #[must_use]
    pub fn new(percepts: Arc<PerceptBase>, beliefs: Arc<BeliefBase>) -> Self {
        Self { percepts, beliefs }
    }

    /// Registers an observation made now at `(kind, object_id)`.
    ///
    /// # Errors
    ///
    /// Fails on an empty kind or object id.
    pub fn register<I, S>(&self, kind: &str, object_id: &str, args: I) -> MemoryResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.percepts.upsert(Percept::new(
            kind,
            object_id,
            args.into_iter().map(Into::into).collect(),
        ))
    }

    /// Applies a producer-built batch as one logical update.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn register_batch(&self, batch: PerceptBatch) -> MemoryResult<usize> {
        self.percepts.upsert_batch(batch)
    }

    /// Returns the first matching percept as a flat row.
    ///
    /// # Errors
    ///
    /// [`MemoryError::NotFound`] when nothing matches.
    pub fn recall(&self, pattern: &PerceptPattern) -> MemoryResult<Vec<String>> {
        let found = self.percepts.search(pattern)?;
        Ok(percept_row(&first(found)?))
    }

    /// Returns the single matching percept as a flat row.
    ///
    /// # Errors
    ///
    /// [`MemoryError::NotFound`] on zero matches,
    /// [`MemoryError::Ambiguous`] on more than one.
    pub fn recall_single(&self, pattern: &PerceptPattern) -> MemoryResult<Vec<String>> {
        let found = self.percepts.search(pattern)?;
        Ok(percept_row(&exactly_one(found)?))
    }

    /// True if at least one percept matches.
    ///
    /// # Errors
    ///
    /// Propagates store failures; zero matches is `Ok(false)`.
    pub fn exists(&self, pattern: &PerceptPattern) -> MemoryResult<bool> {
        Ok(!self.percepts.search(pattern)?.is_empty())
    }

    /// True if exactly one percept matches.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn exists_single(&self, pattern: &PerceptPattern) -> MemoryResult<bool> {
        Ok(self.percepts.search(pattern)?.len() == 1)
    }

    /// Returns when the first matching percept was observed.
    ///
    /// # Errors
    ///
    /// [`MemoryError::NotFound`] when nothing matches.
    pub fn recall_when(&self, pattern: &PerceptPattern) -> MemoryResult<String> {
        let found = self.percepts.search(pattern)?;
        Ok(time::format_timestamp(first(found)?.observed_at))
    }

    /// Returns when the single matching percept was observed.
    ///
    /// # Errors
    ///
    /// [`MemoryError::NotFound`] on zero matches,
    /// [`MemoryError::Ambiguous`] on more than one.
    pub fn recall_when_single(&self, pattern: &PerceptPattern) -> MemoryResult<String> {
        let found = self.percepts.search(pattern)?;
        Ok(time::format_timestamp(exactly_one(found)?.observed_at))
    }

    /// Returns every matching percept as flat rows.
    ///
    /// An empty list is a successful outcome.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn recall_all(&self, pattern: &PerceptPattern) -> MemoryResult<Vec<Vec<String>>> {
        let found = self.percepts.search(pattern)?;
        Ok(found.iter().map(percept_row).collect())
    }

    /// Promotes every matching percept into the belief log.
    ///
    /// Each promotion is a copy; the percept table is unchanged. Returns
    /// the number of promoted percepts.
    ///
    /// # Errors
    ///
    /// [`MemoryError::NotFound`] when nothing matched (so the caller can
    /// tell "remembered nothing" apart from success).
    pub fn remember_that(&self, pattern: &PerceptPattern) -> MemoryResult<usize> {
        let found = self.percepts.search(pattern)?;
        if found.is_empty() {
            return Err(MemoryError::NotFound);
        }
        for percept in &found {
            self.beliefs.add_promoted(percept)?;
        }
        debug!(promoted = found.len(), "promoted percepts to beliefs");
        Ok(found.len())
    }

    /// Removes matching percepts from both indexes.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn forget(&self, pattern: &PerceptPattern) -> MemoryResult<usize> {
        self.percepts.delete(pattern)
    }

    /// Empties the percept table.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn forget_all(&self) -> MemoryResult<usize> {
        self.percepts.clear()
    }
}
