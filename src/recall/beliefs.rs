//! Recall façade over the belief log.

use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::error::MemoryResult;
use crate::pattern::BeliefPattern;
use crate::percept::Percept;
use crate::store::BeliefBase;
use crate::time::{self, TimeFilter};

use super::{belief_row, exactly_one, first};

/// Stateless translation layer between flat-row callers and the
/// [`BeliefBase`].
#[derive(Debug, Clone)]
pub struct BeliefRecall {
    base: Arc<BeliefBase>,
}

impl BeliefRecall {
    /// Wraps a shared belief base.
    #[must_use]
    pub fn new(base: Arc<BeliefBase>) -> Self {
        Self { base }
    }

    /// Records a new belief.
    ///
    /// # Errors
    ///
    /// Fails on an empty name.
    pub fn record<I, S>(&self, name: &str, args: I) -> MemoryResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base
            .add(name, args.into_iter().map(Into::into).collect())
    }

    /// Copies a percept into the log as a durable belief.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn remember_percept(&self, percept: &Percept) -> MemoryResult<()> {
        self.base.add_promoted(percept)
    }

    /// Returns the first matching belief as a flat row.
    ///
    /// # Errors
    ///
    /// [`crate::MemoryError::NotFound`] when nothing matches.
    pub fn recall(&self, pattern: &BeliefPattern) -> MemoryResult<Vec<String>> {
        let found = self.base.search(pattern)?;
        Ok(belief_row(&first(found)?))
    }

    /// Returns the single matching belief as a flat row.
    ///
    /// # Errors
    ///
    /// [`crate::MemoryError::NotFound`] on zero matches,
    /// [`crate::MemoryError::Ambiguous`] on more than one.
    pub fn recall_single(&self, pattern: &BeliefPattern) -> MemoryResult<Vec<String>> {
        let found = self.base.search(pattern)?;
        Ok(belief_row(&exactly_one(found)?))
    }

    /// True if at least one belief matches.
    ///
    /// # Errors
    ///
    /// Propagates store failures; a zero-match outcome is `Ok(false)`, not
    /// an error.
    pub fn exists(&self, pattern: &BeliefPattern) -> MemoryResult<bool> {
        Ok(!self.base.search(pattern)?.is_empty())
    }

    /// True if exactly one belief matches.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn exists_single(&self, pattern: &BeliefPattern) -> MemoryResult<bool> {
        Ok(self.base.search(pattern)?.len() == 1)
    }

    /// Returns when the first matching belief was recorded.
    ///
    /// # Errors
    ///
    /// [`crate::MemoryError::NotFound`] when nothing matches.
    pub fn recall_when(&self, pattern: &BeliefPattern) -> MemoryResult<String> {
        let found = self.base.search(pattern)?;
        Ok(time::format_timestamp(first(found)?.recorded_at))
    }

    /// Returns when the single matching belief was recorded.
    ///
    /// # Errors
    ///
    /// [`crate::MemoryError::NotFound`] on zero matches,
    /// [`crate::MemoryError::Ambiguous`] on more than one.
    pub fn recall_when_single(&self, pattern: &BeliefPattern) -> MemoryResult<String> {
        let found = self.base.search(pattern)?;
        Ok(time::format_timestamp(exactly_one(found)?.recorded_at))
    }

    /// Returns every matching belief as flat rows.
    ///
    /// An empty list is a successful outcome, distinct from the recall
    /// errors of the single-result operations.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn recall_all(&self, pattern: &BeliefPattern) -> MemoryResult<Vec<Vec<String>>> {
        let found = self.base.search(pattern)?;
        Ok(found.iter().map(belief_row).collect())
    }

    /// Matching beliefs recorded strictly before `threshold`.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable threshold.
    pub fn recall_before(
        &self,
        threshold: &str,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        self.recall_in_window(TimeFilter::Before, threshold, pattern)
    }

    /// Matching beliefs recorded at or before `threshold`.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable threshold.
    pub fn recall_before_or_at(
        &self,
        threshold: &str,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        self.recall_in_window(TimeFilter::BeforeOrAt, threshold, pattern)
    }

    /// Matching beliefs recorded strictly after `threshold`.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable threshold.
    pub fn recall_after(
        &self,
        threshold: &str,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        self.recall_in_window(TimeFilter::After, threshold, pattern)
    }

    /// Matching beliefs recorded at or after `threshold`.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable threshold.
    pub fn recall_after_or_at(
        &self,
        threshold: &str,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        self.recall_in_window(TimeFilter::AfterOrAt, threshold, pattern)
    }

    /// Matching beliefs recorded within the last `secs` seconds.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn recall_recent(
        &self,
        secs: i64,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        let threshold = Utc::now() - Duration::seconds(secs);
        let found = self
            .base
            .search_in_window(pattern, TimeFilter::AfterOrAt, threshold)?;
        Ok(found.iter().map(belief_row).collect())
    }

    /// Matching beliefs recorded more than `secs` seconds ago.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn recall_past(
        &self,
        secs: i64,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        let threshold = Utc::now() - Duration::seconds(secs);
        let found = self
            .base
            .search_in_window(pattern, TimeFilter::BeforeOrAt, threshold)?;
        Ok(found.iter().map(belief_row).collect())
    }

    fn recall_in_window(
        &self,
        filter: TimeFilter,
        threshold: &str,
        pattern: &BeliefPattern,
    ) -> MemoryResult<Vec<Vec<String>>> {
        let threshold = time::parse_timestamp(threshold)?;
        let found = self.base.search_in_window(pattern, filter, threshold)?;
        Ok(found.iter().map(belief_row).collect())
    }

    /// Removes matching beliefs; an unconstrained pattern clears the log.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn forget(&self, pattern: &BeliefPattern) -> MemoryResult<usize> {
        self.base.delete(pattern)
    }

    /// Empties the log.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn forget_all(&self) -> MemoryResult<usize> {
        self.base.clear()
    }

    /// Saves the log to a snapshot file.
    ///
    /// # Errors
    ///
    /// Propagates snapshot failures.
    pub fn save_to(&self, path: impl AsRef<Path>) -> MemoryResult<()> {
        self.base.save_to(path)
    }

    /// Replaces the log with a snapshot file's contents.
    ///
    /// # Errors
    ///
    /// Propagates snapshot failures; the log is untouched on error.
    pub fn restore_from(&self, path: impl AsRef<Path>) -> MemoryResult<()> {
        self.base.restore_from(path)
    }
}
