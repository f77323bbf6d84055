//! Candidate-key enumeration.
//!
//! A key is an attribute set whose closure is the whole schema; a candidate
//! key is a key none of whose proper subsets is a key. Finding all of them
//! is exponential in general, so the search is pruned before it starts.
//!
//! # Pruning
//!
//! Every attribute is classified by where it occurs in the dependencies:
//!
//! - *L-only* or *neither*: no dependency can produce it, so it belongs to
//!   every candidate key (the *core*).
//! - *R-only*: always produced by the rest, so it belongs to no candidate
//!   key.
//! - *both*: the only attributes the search has to branch over.
//!
//! If the core alone is a key it is the unique candidate key. Otherwise the
//! core is extended with subsets of the *both* attributes, smallest first.
//! A candidate that contains an already accepted key is skipped without
//! computing its closure, which also stops the search on every superset of a
//! found key. The search is an explicit loop over index combinations, metered
//! by a [`Budget`] at every expansion.

use alloc::vec::Vec;

use super::closure::closure;
use super::search::next_combination;
use crate::attribute::{Attribute, AttributeSet};
use crate::budget::Budget;
use crate::error::Error;
use crate::schema::Schema;

/// Attributes of a schema grouped by where they occur in its dependencies.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeClasses {
    /// Only on left-hand sides.
    pub left_only: AttributeSet,
    /// Only on right-hand sides.
    pub right_only: AttributeSet,
    /// On both sides.
    pub both: AttributeSet,
    /// In no dependency.
    pub neither: AttributeSet,
}

impl AttributeClasses {
    /// Attributes contained in every candidate key.
    #[must_use]
    pub const fn core(&self) -> AttributeSet {
        self.left_only.union(self.neither)
    }
}

/// Classifies the attributes of `schema`.
///
/// Trivial right-hand side occurrences (`AB -> A`) do not count: such an
/// attribute is never actually produced by the dependency.
#[must_use]
pub fn classify_attributes(schema: &Schema) -> AttributeClasses {
    let (left, right) = schema.dependencies().iter().fold(
        (AttributeSet::empty(), AttributeSet::empty()),
        |(left, right), fd| (left.union(fd.lhs), right.union(fd.rhs.difference(fd.lhs))),
    );
    let all = schema.attributes();
    let left = left.intersection(all);
    let right = right.intersection(all);
    AttributeClasses {
        left_only: left.difference(right),
        right_only: right.difference(left),
        both: left.intersection(right),
        neither: all.difference(left.union(right)),
    }
}

/// Enumerates every candidate key of `schema`.
///
/// Keys are returned in [`AttributeSet::canonical_cmp`] order: smallest
/// first, then member-wise in interning order.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] if there are more branching attributes
/// than `budget.max_attributes` or the search takes more steps or time than
/// allowed.
pub fn candidate_keys(schema: &Schema, budget: &Budget) -> Result<Vec<AttributeSet>, Error> {
    let universal = schema.attributes();
    let dependencies = schema.dependencies();
    let classes = classify_attributes(schema);
    let core = classes.core();
    let mut meter = budget.meter();

    tracing::debug!(
        attributes = universal.len(),
        core = core.len(),
        both = classes.both.len(),
        "candidate keys: search start"
    );

    meter.tick()?;
    if closure(core, dependencies) == universal {
        tracing::debug!("candidate keys: core is the unique key");
        return Ok(alloc::vec![core]);
    }

    let branching: Vec<Attribute> = classes.both.iter().collect();
    budget.check_width(branching.len())?;

    let mut keys: Vec<AttributeSet> = Vec::new();
    for size in 1..=branching.len() {
        let mut indices: Vec<usize> = (0..size).collect();
        loop {
            let candidate = indices
                .iter()
                .fold(core, |acc, &i| acc.with(branching[i]));
            if !keys.iter().any(|key| key.is_subset(candidate)) {
                meter.tick()?;
                if closure(candidate, dependencies) == universal {
                    keys.push(candidate);
                }
            }
            if !next_combination(&mut indices, branching.len()) {
                break;
            }
        }
        tracing::trace!(size, keys = keys.len(), "candidate keys: level done");
    }

    keys.sort_by(AttributeSet::canonical_cmp);
    tracing::debug!(
        keys = keys.len(),
        steps = meter.steps(),
        "candidate keys: search done"
    );
    Ok(keys)
}

/// Finds one candidate key in polynomial time.
///
/// Starts from all attributes and drops each attribute, in interning order,
/// whose removal still leaves a key.
#[must_use]
pub fn find_key(schema: &Schema) -> AttributeSet {
    let universal = schema.attributes();
    universal.iter().fold(universal, |key, attribute| {
        let smaller = key.without(attribute);
        if closure(smaller, schema.dependencies()).is_superset(universal) {
            smaller
        } else {
            key
        }
    })
}

/// Attributes that belong to at least one of `keys`.
#[must_use]
pub fn prime_attributes(keys: &[AttributeSet]) -> AttributeSet {
    keys.iter()
        .fold(AttributeSet::empty(), |acc, key| acc.union(*key))
}
