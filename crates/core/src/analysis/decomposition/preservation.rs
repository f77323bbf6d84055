//! Dependency projection and preservation.
//!
//! The projection of `F` onto a sub-relation `Ri` is a minimal cover of
//! `{ X -> Y : X, Y ⊆ Ri, Y ⊆ X⁺ }`, closures taken under the original `F`.
//! A decomposition preserves dependencies iff the union of its projections
//! is equivalent to `F`.
//!
//! Projection enumerates the subsets of `Ri`, so its width is checked
//! against the [`Budget`] and each subset costs one step.

use alloc::vec::Vec;

use super::Decomposition;
use crate::analysis::closure::closure;
use crate::analysis::cover::minimal_cover;
use crate::analysis::equivalence::{are_equivalent, missing};
use crate::attribute::{Attribute, AttributeSet};
use crate::budget::{Budget, Meter};
use crate::dependency::{FdSet, FunctionalDependency};
use crate::error::Error;
use crate::schema::Schema;

/// Outcome of [`dependency_preservation`].
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservationReport {
    pub preserved: bool,
    /// Projected dependencies, one set per sub-relation.
    pub projections: Vec<FdSet>,
    /// Dependencies of the schema not implied by the projections.
    pub lost: Vec<FunctionalDependency>,
}

/// Projects `dependencies` onto `relation`.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] if `relation` is wider than
/// `budget.max_attributes` or the enumeration runs out of steps or time.
pub fn project(
    dependencies: &FdSet,
    relation: AttributeSet,
    budget: &Budget,
) -> Result<FdSet, Error> {
    budget.check_width(relation.len())?;
    let mut meter = budget.meter();
    project_metered(dependencies, relation, &mut meter)
}

fn project_metered(
    dependencies: &FdSet,
    relation: AttributeSet,
    meter: &mut Meter,
) -> Result<FdSet, Error> {
    let members: Vec<Attribute> = relation.iter().collect();
    let mut projected = FdSet::new();

    #[allow(clippy::cast_possible_truncation)]
    let subsets = 1u128
        .checked_shl(members.len() as u32)
        .unwrap_or(u128::MAX);

    // Subset `mask` of `members`; the empty subset determines nothing.
    for mask in 1..subsets {
        meter.tick()?;
        let lhs: AttributeSet = members
            .iter()
            .enumerate()
            .filter(|&(bit, _)| mask & (1u128 << bit) != 0)
            .map(|(_, &attribute)| attribute)
            .collect();
        let rhs = closure(lhs, dependencies)
            .intersection(relation)
            .difference(lhs);
        if !rhs.is_empty() {
            projected.insert(FunctionalDependency::new(lhs, rhs));
        }
    }

    Ok(minimal_cover(&projected))
}

/// Projects the schema's dependencies onto every sub-relation and reports
/// which dependencies, if any, are lost.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] from the projections.
pub fn dependency_preservation(
    schema: &Schema,
    decomposition: &Decomposition,
    budget: &Budget,
) -> Result<PreservationReport, Error> {
    let mut meter = budget.meter();
    let mut projections = Vec::with_capacity(decomposition.len());
    for relation in decomposition {
        budget.check_width(relation.len())?;
        projections.push(project_metered(schema.dependencies(), *relation, &mut meter)?);
    }

    let combined = projections
        .iter()
        .fold(FdSet::new(), |acc, projection| acc.union(projection));
    let preserved = are_equivalent(schema.dependencies(), &combined);
    let lost: Vec<FunctionalDependency> =
        missing(&combined, schema.dependencies()).copied().collect();

    tracing::debug!(
        relations = decomposition.len(),
        preserved,
        lost = lost.len(),
        steps = meter.steps(),
        "dependency preservation"
    );

    Ok(PreservationReport {
        preserved,
        projections,
        lost,
    })
}

/// `true` if the projections of the schema's dependencies onto the
/// sub-relations together imply all of them.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] from the projections.
pub fn preserves_dependencies(
    schema: &Schema,
    decomposition: &Decomposition,
    budget: &Budget,
) -> Result<bool, Error> {
    dependency_preservation(schema, decomposition, budget).map(|report| report.preserved)
}
