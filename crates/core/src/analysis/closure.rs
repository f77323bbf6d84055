//! Attribute-set closure.
//!
//! `closure(X, F)` is the largest attribute set functionally determined by
//! `X` under `F`. It is computed as a fixed point: starting from `X`, every
//! dependency whose left-hand side is already contained in the result adds
//! its right-hand side, until a full pass over `F` adds nothing. Each
//! productive pass adds at least one attribute, so the loop runs at most
//! `|attributes| + 1` passes of `O(|F|)` word operations.

use crate::attribute::AttributeSet;
use crate::dependency::{FdSet, FunctionalDependency};
use crate::schema::Schema;

/// Computes `attributes⁺` under `dependencies`.
#[must_use]
pub fn closure(attributes: AttributeSet, dependencies: &FdSet) -> AttributeSet {
    closure_excluding(attributes, dependencies.as_slice(), None)
}

/// Closure under `dependencies` with the dependency at index `skip` left out.
///
/// Lets the cover reducer test redundancy without rebuilding the set.
pub(crate) fn closure_excluding(
    attributes: AttributeSet,
    dependencies: &[FunctionalDependency],
    skip: Option<usize>,
) -> AttributeSet {
    let mut result = attributes;
    loop {
        let mut grew = false;
        for (i, fd) in dependencies.iter().enumerate() {
            if Some(i) == skip {
                continue;
            }
            if fd.lhs.is_subset(result) && !fd.rhs.is_subset(result) {
                result = result.union(fd.rhs);
                grew = true;
            }
        }
        if !grew {
            return result;
        }
    }
}

/// `true` if `attributes` determines every attribute of `schema`.
#[must_use]
pub fn is_superkey(schema: &Schema, attributes: AttributeSet) -> bool {
    closure(attributes, schema.dependencies()).is_superset(schema.attributes())
}

/// `true` if `dependency` follows from `dependencies`.
#[must_use]
pub fn implies(dependencies: &FdSet, dependency: &FunctionalDependency) -> bool {
    closure(dependency.lhs, dependencies).is_superset(dependency.rhs)
}
