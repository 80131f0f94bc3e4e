//! # Engram — belief and percept memory for embodied agents
//!
//! Engram is the memory subsystem of an embodied agent: two complementary
//! fact stores that record what the agent has experienced and what it
//! currently observes, both queryable through partial, wildcard-capable
//! patterns.
//!
//! ## Core Concepts
//!
//! - **Belief**: a durable, log-style fact keyed by name; duplicates are
//!   allowed and history only disappears on explicit deletion.
//! - **Percept**: a current-state fact keyed by `(kind, object_id)`; a
//!   newer observation silently replaces the older one.
//! - **Pattern**: a query template with wildcardable key fields and a
//!   prefix of argument constraints.
//! - **Recall façades**: flat string-row adapters used by command
//!   handlers, with single-result, existence, and list result shapes.
//!
//! ## Usage
//!
//! ```
//! use engram::{AgentMemory, BeliefPattern, PerceptPattern};
//!
//! let memory = AgentMemory::new();
//! let beliefs = memory.belief_recall();
//! let percepts = memory.percept_recall();
//!
//! beliefs.record("likes", ["alice", "tea"]).unwrap();
//! percepts.register("avatar", "u1", ["1", "2", "3"]).unwrap();
//!
//! let row = beliefs
//!     .recall(&BeliefPattern::new().name("likes").arg("alice"))
//!     .unwrap();
//! assert_eq!(&row[..3], ["likes", "alice", "tea"]);
//!
//! assert!(percepts
//!     .exists(&PerceptPattern::new().kind("avatar").object("u1"))
//!     .unwrap());
//! ```
//!
//! The belief log can be saved to and restored from a JSON snapshot;
//! restore is all-or-nothing and resets every creation instant to the
//! restore time. Percepts are never persisted — they are re-derivable
//! world state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod belief;
pub mod error;
pub mod pattern;
pub mod percept;
pub mod recall;
pub mod store;
pub mod time;

// Re-export primary types at crate root for convenience
pub use belief::{Belief, PROMOTED_BELIEF_NAME};
pub use error::{MemoryError, MemoryResult, SnapshotError, ValidationError};
pub use pattern::{BeliefPattern, PerceptPattern};
pub use percept::{Percept, PerceptBatch};
pub use recall::{BeliefRecall, PerceptRecall};
pub use store::{AgentMemory, BeliefBase, PerceptBase};
pub use time::TimeFilter;
