//! Flat string-row façades over the stores.
//!
//! Command handlers speak in flat rows: a belief row is
//! `[name, args..., timestamp]` and a percept row is
//! `[kind, object_id, args..., timestamp]`, with the timestamp formatted
//! as a seconds-precision ISO-8601 string. The façades own no state; they
//! translate rows and patterns into store calls and map the three result
//! shapes callers rely on — a single row, a boolean existence check, and a
//! row list — keeping "zero matches" and "more than one match where one
//! was required" apart as distinct failures.

mod beliefs;
mod percepts;

pub use beliefs::BeliefRecall;
pub use percepts::PerceptRecall;

use crate::belief::Belief;
use crate::error::{MemoryError, MemoryResult};
use crate::percept::Percept;
use crate::time::format_timestamp;

/// Flattens a belief into `[name, args..., timestamp]`.
pub(crate) fn belief_row(belief: &Belief) -> Vec<String> {
    let mut row = Vec::with_capacity(belief.args.len() + 2);
    row.push(belief.name.clone());
    row.extend(belief.args.iter().cloned());
    row.push(format_timestamp(belief.recorded_at));
    row
}

/// Flattens a percept into `[kind, object_id, args..., timestamp]`.
pub(crate) fn percept_row(percept: &Percept) -> Vec<String> {
    let mut row = Vec::with_capacity(percept.args.len() + 3);
    row.push(percept.kind.clone());
    row.push(percept.object_id.clone());
    row.extend(percept.args.iter().cloned());
    row.push(format_timestamp(percept.observed_at));
    row
}

/// First match, or [`MemoryError::NotFound`] when there are none.
pub(crate) fn first<T>(matches: Vec<T>) -> MemoryResult<T> {
    matches.into_iter().next().ok_or(MemoryError::NotFound)
}

/// The only match, [`MemoryError::NotFound`] on zero, or
/// [`MemoryError::Ambiguous`] on several.
pub(crate) fn exactly_one<T>(matches: Vec<T>) -> MemoryResult<T> {
    let mut matches = matches.into_iter();
    match (matches.next(), matches.len()) {
        (None, _) => Err(MemoryError::NotFound),
        (Some(only), 0) => Ok(only),
        (Some(_), rest) => Err(MemoryError::Ambiguous { matches: rest + 1 }),
    }
}
