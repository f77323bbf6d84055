//! Implication and equivalence between dependency sets.

use super::closure::implies;
use crate::dependency::{FdSet, FunctionalDependency};

/// `true` if every dependency of `other` follows from `dependencies`.
#[must_use]
pub fn implies_all(dependencies: &FdSet, other: &FdSet) -> bool {
    other.iter().all(|fd| implies(dependencies, fd))
}

/// `true` if `left` and `right` imply each other.
#[must_use]
pub fn are_equivalent(left: &FdSet, right: &FdSet) -> bool {
    let equivalent = implies_all(left, right) && implies_all(right, left);
    tracing::debug!(
        left = left.len(),
        right = right.len(),
        equivalent,
        "equivalence check"
    );
    equivalent
}

/// The dependencies of `other` that do not follow from `dependencies`.
pub fn missing<'a>(
    dependencies: &'a FdSet,
    other: &'a FdSet,
) -> impl Iterator<Item = &'a FunctionalDependency> + 'a {
    other.iter().filter(move |fd| !implies(dependencies, fd))
}
