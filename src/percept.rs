//! Percept records — the current-state facts in an agent's memory.
//!
//! A percept describes the latest known state of one world object as seen
//! through one kind of observation ("region", "avatar", "name_of", ...).
//! The `(kind, object_id)` pair is the identity of a percept; a newer
//! observation with the same pair silently replaces the older one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observed fact about a world object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    /// What kind of observation this is.
    pub kind: String,

    /// Opaque identifier of the observed object.
    pub object_id: String,

    /// Ordered, semantically untyped payload.
    pub args: Vec<String>,

    /// Producer-assigned observation instant. May precede insertion time
    /// when observations are delivered asynchronously.
    pub observed_at: DateTime<Utc>,
}

impl Percept {
    /// Creates a percept observed now.
    #[must_use]
    pub fn new(kind: impl Into<String>, object_id: impl Into<String>, args: Vec<String>) -> Self {
        Self::observed(kind, object_id, args, Utc::now())
    }

    /// Creates a percept with an explicit observation instant.
    #[must_use]
    pub fn observed(
        kind: impl Into<String>,
        object_id: impl Into<String>,
        args: Vec<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: kind.into(),
            object_id: object_id.into(),
            args,
            observed_at: at,
        }
    }
}

impl std::fmt::Display for Percept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]({})",
            self.kind,
            self.object_id,
            self.args.join(", ")
        )
    }
}

/// An ordered batch of percepts applied to the store as one logical update.
///
/// Producers that derive several related facts from a single observation
/// collect them here so readers never see a half-applied observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptBatch {
    percepts: Vec<Percept>,
}

impl PerceptBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a percept to the batch.
    pub fn push(&mut self, percept: Percept) {
        self.percepts.push(percept);
    }

    /// Number of percepts in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.percepts.len()
    }

    /// True if the batch holds no percepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.percepts.is_empty()
    }

    /// Iterates the batch in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Percept> {
        self.percepts.iter()
    }
}

impl From<Vec<Percept>> for PerceptBatch {
    fn from(percepts: Vec<Percept>) -> Self {
        Self { percepts }
    }
}

impl IntoIterator for PerceptBatch {
    type Item = Percept;
    type IntoIter = std::vec::IntoIter<Percept>;

    fn into_iter(self) -> Self::IntoIter {
        self.percepts.into_iter()
    }
}
