//! The two fact stores and their aggregate bundle.
//!
//! [`BeliefBase`] is the durable event log; [`PerceptBase`] is the
//! current-state table. Each is internally synchronized behind one coarse
//! lock and owns its facts outright — reads hand out copies, never live
//! references.

mod beliefs;
mod percepts;
pub(crate) mod snapshot;

pub use beliefs::BeliefBase;
pub use percepts::PerceptBase;

use std::sync::Arc;

use crate::recall::{BeliefRecall, PerceptRecall};

/// Convenience bundle of one belief base and one percept base.
///
/// This is the usual entry point for an agent: hold one `AgentMemory`,
/// hand the percept store to observation producers, and use the recall
/// façades from command handlers.
#[derive(Debug, Default)]
pub struct AgentMemory {
    beliefs: Arc<BeliefBase>,
    percepts: Arc<PerceptBase>,
}

impl AgentMemory {
    /// Creates an empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The belief store.
    #[must_use]
    pub fn beliefs(&self) -> &Arc<BeliefBase> {
        &self.beliefs
    }

    /// The percept store.
    #[must_use]
    pub fn percepts(&self) -> &Arc<PerceptBase> {
        &self.percepts
    }

    /// A flat-row façade over the belief store.
    #[must_use]
    pub fn belief_recall(&self) -> BeliefRecall {
        BeliefRecall::new(Arc::clone(&self.beliefs))
    }

    /// A flat-row façade over the percept store (and the belief store,
    /// for promotion).
    #[must_use]
    pub fn percept_recall(&self) -> PerceptRecall {
        PerceptRecall::new(Arc::clone(&self.percepts), Arc::clone(&self.beliefs))
    }
}
