//! Belief records — the durable, log-style facts in an agent's memory.
//!
//! A belief is a named fact with an ordered, untyped string payload and a
//! creation instant. Beliefs are flexible enough that no argument position
//! can serve as a general index; the name alone buckets the log (see
//! [`crate::store::BeliefBase`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::percept::Percept;

/// Bucket name under which promoted percepts are recorded.
pub const PROMOTED_BELIEF_NAME: &str = "percept";

/// A single recorded belief.
///
/// Multiple beliefs may share a name; the belief base is a log, not a
/// table, and never deduplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Belief {
    /// The belief's name. Never empty once stored.
    pub name: String,

    /// Ordered, semantically untyped payload.
    pub args: Vec<String>,

    /// When this belief was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Belief {
    /// Creates a belief recorded now.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::recorded(name, args, Utc::now())
    }

    /// Creates a belief with an explicit creation instant.
    #[must_use]
    pub fn recorded(name: impl Into<String>, args: Vec<String>, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            args,
            recorded_at: at,
        }
    }

    /// Copies a percept into belief form.
    ///
    /// The promoted belief is named [`PROMOTED_BELIEF_NAME`] and carries
    /// `[kind, object_id, args...]` as its payload. Its creation instant is
    /// the percept's observation time, not the promotion time; the source
    /// percept is left untouched in its own store.
    #[must_use]
    pub fn promoted_from(percept: &Percept) -> Self {
        let mut args = Vec::with_capacity(percept.args.len() + 2);
        args.push(percept.kind.clone());
        args.push(percept.object_id.clone());
        args.extend(percept.args.iter().cloned());
        Self::recorded(PROMOTED_BELIEF_NAME, args, percept.observed_at)
    }
}

impl std::fmt::Display for Belief {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_stamps_creation_time() {
        let before = Utc::now();
        let belief = Belief::new("seen", vec!["tree".to_string()]);
        let after = Utc::now();

        assert_eq!(belief.name, "seen");
        assert_eq!(belief.args, vec!["tree".to_string()]);
        assert!(belief.recorded_at >= before && belief.recorded_at <= after);
    }

    #[test]
    fn promotion_copies_keys_and_keeps_observation_time() {
        let observed = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let percept = Percept::observed(
            "avatar",
            "u1",
            vec!["1".to_string(), "2".to_string()],
            observed,
        );

        let belief = Belief::promoted_from(&percept);
        assert_eq!(belief.name, PROMOTED_BELIEF_NAME);
        assert_eq!(
            belief.args,
            vec![
                "avatar".to_string(),
                "u1".to_string(),
                "1".to_string(),
                "2".to_string()
            ]
        );
        assert_eq!(belief.recorded_at, observed);
    }

    #[test]
    fn serde_round_trip() {
        let belief = Belief::new("likes", vec!["alice".to_string(), "tea".to_string()]);
        let json = serde_json::to_string(&belief).unwrap();
        let back: Belief = serde_json::from_str(&json).unwrap();
        assert_eq!(back, belief);
    }
}
