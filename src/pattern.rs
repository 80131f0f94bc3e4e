//! Wildcard pattern types and the shared matching algorithm.
//!
//! A pattern is an ordered template: leading key slots (one for beliefs,
//! two for percepts) followed by argument slots. Every slot is either a
//! concrete string or a wildcard. Matching is prefix-style: a template
//! constrains only the argument positions it names, so a short template
//! matches facts with additional trailing arguments — but a template
//! longer than the candidate's argument list never matches, wildcards
//! included.

use serde::{Deserialize, Serialize};

use crate::belief::Belief;
use crate::percept::Percept;

/// Core matching routine shared by both fact shapes.
///
/// `keys` pairs each key slot with the candidate's key value; the slice
/// length is the key arity (1 for beliefs, 2 for percepts). Key and
/// argument comparisons are case-sensitive string equality; a wildcard
/// slot (`None`) always matches.
fn template_matches(keys: &[(Option<&str>, &str)], slots: &[Option<String>], args: &[String]) -> bool {
    for (slot, value) in keys {
        if let Some(required) = slot {
            if required != value {
                return false;
            }
        }
    }
    if slots.len() > args.len() {
        // The candidate is too short to satisfy every templated position.
        return false;
    }
    slots
        .iter()
        .zip(args)
        .all(|(slot, arg)| slot.as_ref().map_or(true, |required| required == arg))
}

/// Query template over the belief log.
///
/// ```
/// use engram::BeliefPattern;
///
/// // name "likes", first arg "alice", second arg anything
/// let pattern = BeliefPattern::new().name("likes").arg("alice").wildcard();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefPattern {
    name: Option<String>,
    args: Vec<Option<String>>,
}

impl BeliefPattern {
    /// Creates an empty (all-wildcard, zero-argument) pattern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`BeliefPattern::new`] that reads better at call sites
    /// querying for every belief.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Builds a pattern from already-flattened optional slots.
    #[must_use]
    pub fn from_parts(name: Option<String>, args: Vec<Option<String>>) -> Self {
        Self { name, args }
    }

    /// Constrains the belief name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a concrete argument constraint.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Some(value.into()));
        self
    }

    /// Appends a wildcard argument slot.
    ///
    /// The slot matches any value but still requires the candidate to have
    /// an argument at that position.
    #[must_use]
    pub fn wildcard(mut self) -> Self {
        self.args.push(None);
        self
    }

    /// The name constraint, if any.
    #[must_use]
    pub fn name_slot(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The argument slots.
    #[must_use]
    pub fn arg_slots(&self) -> &[Option<String>] {
        &self.args
    }

    /// True when the pattern constrains nothing: wildcard name and zero
    /// argument slots. Searching with such a pattern returns every belief;
    /// deleting with it clears the entire store.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.name.is_none() && self.args.is_empty()
    }

    /// Tests this pattern against a belief.
    #[must_use]
    pub fn matches(&self, belief: &Belief) -> bool {
        template_matches(
            &[(self.name.as_deref(), belief.name.as_str())],
            &self.args,
            &belief.args,
        )
    }
}

/// Query template over the percept table.
///
/// The first two slots address the `(kind, object_id)` dual key; each is
/// independently wildcardable, which selects the index the store scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptPattern {
    kind: Option<String>,
    object_id: Option<String>,
    args: Vec<Option<String>>,
}

impl PerceptPattern {
    /// Creates an empty (all-wildcard, zero-argument) pattern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`PerceptPattern::new`] for query-everything call sites.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Builds a pattern from already-flattened optional slots.
    #[must_use]
    pub fn from_parts(
        kind: Option<String>,
        object_id: Option<String>,
        args: Vec<Option<String>>,
    ) -> Self {
        Self {
            kind,
            object_id,
            args,
        }
    }

    /// Constrains the percept kind.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Constrains the observed object id.
    #[must_use]
    pub fn object(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// Appends a concrete argument constraint.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Some(value.into()));
        self
    }

    /// Appends a wildcard argument slot (matches anything, requires arity).
    #[must_use]
    pub fn wildcard(mut self) -> Self {
        self.args.push(None);
        self
    }

    /// The kind constraint, if any.
    #[must_use]
    pub fn kind_slot(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// The object id constraint, if any.
    #[must_use]
    pub fn object_slot(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    /// The argument slots.
    #[must_use]
    pub fn arg_slots(&self) -> &[Option<String>] {
        &self.args
    }

    /// True when both keys are wildcards and no argument slots exist.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.kind.is_none() && self.object_id.is_none() && self.args.is_empty()
    }

    /// Tests this pattern against a percept.
    #[must_use]
    pub fn matches(&self, percept: &Percept) -> bool {
        template_matches(
            &[
                (self.kind.as_deref(), percept.kind.as_str()),
                (self.object_id.as_deref(), percept.object_id.as_str()),
            ],
            &self.args,
            &percept.args,
        )
    }
}
