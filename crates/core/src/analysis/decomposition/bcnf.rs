//! Lossless BCNF decomposition.
//!
//! Sub-relations are processed from a worklist. For a sub-relation `Ri`,
//! subsets `X ⊂ Ri` are tried smallest first; the first `X` with
//! `X ⊂ X⁺ ∩ Ri ⊂ Ri` witnesses a BCNF violation and `Ri` is replaced by
//! `X⁺ ∩ Ri` and `Ri ∖ (X⁺ ∖ X)`. Every split is lossless because the two
//! halves share `X`, which determines the first half. Dependencies may be
//! lost; callers check with
//! [`preserves_dependencies`](super::preserves_dependencies).

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::Decomposition;
use crate::analysis::closure::closure;
use crate::analysis::search::next_combination;
use crate::attribute::{Attribute, AttributeSet};
use crate::budget::{Budget, Meter};
use crate::error::Error;
use crate::schema::Schema;

/// Decomposes `schema` into BCNF sub-relations.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] if a sub-relation is wider than
/// `budget.max_attributes` or the violation search runs out of steps or time.
pub fn decompose_bcnf(schema: &Schema, budget: &Budget) -> Result<Decomposition, Error> {
    let mut meter = budget.meter();
    let mut worklist = VecDeque::from([schema.attributes()]);
    let mut done = Vec::new();

    while let Some(relation) = worklist.pop_front() {
        budget.check_width(relation.len())?;
        match find_violation(schema, relation, &mut meter)? {
            Some((lhs, determined)) => {
                let left = determined;
                let right = relation.difference(determined.difference(lhs));
                tracing::trace!(
                    relation = relation.len(),
                    left = left.len(),
                    right = right.len(),
                    "BCNF split"
                );
                worklist.push_back(left);
                worklist.push_back(right);
            }
            None => done.push(relation),
        }
    }

    let decomposition = Decomposition::new(done).without_subsumed();
    tracing::debug!(
        relations = decomposition.len(),
        steps = meter.steps(),
        "BCNF decomposition done"
    );
    Ok(decomposition)
}

/// Returns `(X, X⁺ ∩ relation)` for the first BCNF-violating `X`.
fn find_violation(
    schema: &Schema,
    relation: AttributeSet,
    meter: &mut Meter,
) -> Result<Option<(AttributeSet, AttributeSet)>, Error> {
    let members: Vec<Attribute> = relation.iter().collect();
    for size in 1..members.len() {
        let mut indices: Vec<usize> = (0..size).collect();
        loop {
            meter.tick()?;
            let lhs: AttributeSet = indices.iter().map(|&i| members[i]).collect();
            let determined = closure(lhs, schema.dependencies()).intersection(relation);
            if determined != lhs && determined != relation {
                return Ok(Some((lhs, determined)));
            }
            if !next_combination(&mut indices, members.len()) {
                break;
            }
        }
    }
    Ok(None)
}
