//! Minimal (canonical) cover.
//!
//! A minimal cover of `F` is an equivalent set of dependencies in which
//! every right-hand side is a single attribute, no left-hand side contains an
//! extraneous attribute and no dependency is implied by the others.
//!
//! # Algorithm
//!
//! 1. Split every `X -> A1..Ak` into `X -> A1, ..., X -> Ak`.
//! 2. For every dependency `X -> A` with `|X| > 1`, try dropping each
//!    `B ∈ X` in interning order; if `A ∈ (X ∖ {B})⁺` the attribute is
//!    extraneous, it is removed and the scan of that dependency restarts.
//! 3. Drop every `X -> A` with `A ∈ X⁺` computed without it.
//! 4. Repeat 2–3 until a pass changes nothing.
//!
//! Minimal covers are not unique. The result is made deterministic by
//! always processing dependencies in input order and left-hand attributes in
//! interning order; it is one valid minimal cover, not "the" cover.

use alloc::vec::Vec;

use super::closure::closure_excluding;
use crate::dependency::{FdSet, FunctionalDependency};

/// Computes a minimal cover of `dependencies`.
#[must_use]
pub fn minimal_cover(dependencies: &FdSet) -> FdSet {
    let mut current: Vec<FunctionalDependency> = Vec::new();
    for fd in dependencies.iter().flat_map(|fd| fd.split()) {
        if !current.contains(&fd) {
            current.push(fd);
        }
    }

    tracing::debug!(
        input = dependencies.len(),
        split = current.len(),
        "minimal cover: right-hand sides split"
    );

    let mut pass = 0u32;
    loop {
        let reduced = reduce_left_sides(&mut current);
        let removed = remove_redundant(&mut current);

        tracing::trace!(pass, reduced, removed, "minimal cover: pass");

        if reduced == 0 && removed == 0 {
            break;
        }
        pass += 1;
    }

    tracing::debug!(
        passes = pass + 1,
        size = current.len(),
        "minimal cover: fixpoint reached"
    );

    current.into_iter().collect()
}

/// Removes extraneous left-hand attributes; returns how many were removed.
fn reduce_left_sides(current: &mut [FunctionalDependency]) -> usize {
    let mut removed = 0;
    for i in 0..current.len() {
        'restart: loop {
            let fd = current[i];
            if fd.lhs.len() <= 1 {
                break;
            }
            for attribute in fd.lhs.iter() {
                let smaller = fd.lhs.without(attribute);
                if closure_excluding(smaller, current, None).is_superset(fd.rhs) {
                    current[i] = FunctionalDependency::new(smaller, fd.rhs);
                    removed += 1;
                    continue 'restart;
                }
            }
            break;
        }
    }
    removed
}

/// Drops dependencies implied by the rest; returns how many were dropped.
fn remove_redundant(current: &mut Vec<FunctionalDependency>) -> usize {
    let mut removed = 0;
    let mut i = 0;
    while i < current.len() {
        let fd = current[i];
        if closure_excluding(fd.lhs, current, Some(i)).is_superset(fd.rhs) {
            current.remove(i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::equivalence::are_equivalent;
    use crate::schema::Schema;

    fn cover_of(schema: &Schema) -> Vec<alloc::string::String> {
        use alloc::string::ToString;
        minimal_cover(schema.dependencies())
            .iter()
            .map(|fd| schema.named(fd).to_string())
            .collect()
    }

    #[test]
    fn test_canonical_input_is_unchanged() {
        let schema = Schema::builder()
            .dependency(["A"], ["B"])
            .dependency(["B"], ["C"])
            .dependency(["C"], ["D"])
            .build()
            .unwrap();
        assert_eq!(&minimal_cover(schema.dependencies()), schema.dependencies());
    }

    #[test]
    fn test_split_and_transitive_redundancy() {
        let schema = Schema::builder()
            .dependency(["A"], ["B", "C"])
            .dependency(["B"], ["C"])
            .build()
            .unwrap();
        assert_eq!(cover_of(&schema), vec!["A -> B", "B -> C"]);
    }

    #[test]
    fn test_extraneous_left_attribute() {
        let schema = Schema::builder()
            .dependency(["A", "B"], ["C"])
            .dependency(["A"], ["B"])
            .build()
            .unwrap();
        assert_eq!(cover_of(&schema), vec!["A -> C", "A -> B"]);
    }

    #[test]
    fn test_trivial_dependencies_vanish() {
        let schema = Schema::builder()
            .dependency(["A", "B"], ["A"])
            .dependency(["A"], ["B"])
            .build()
            .unwrap();
        assert_eq!(cover_of(&schema), vec!["A -> B"]);
    }

    #[test]
    fn test_textbook_example() {
        let schema = Schema::builder()
            .dependency(["A", "B"], ["C"])
            .dependency(["C"], ["A"])
            .dependency(["B", "C"], ["D"])
            .dependency(["A", "C", "D"], ["B"])
            .dependency(["D"], ["E", "G"])
            .dependency(["B", "E"], ["C"])
            .dependency(["C"], ["D"])
            .dependency(["C", "E"], ["G"])
            .build()
            .unwrap();
        assert_eq!(
            cover_of(&schema),
            vec![
                "A B -> C", "C -> A", "C -> B", "D -> E", "D -> G", "B E -> C", "C -> D"
            ]
        );
        assert!(are_equivalent(
            schema.dependencies(),
            &minimal_cover(schema.dependencies())
        ));
    }

    #[test]
    fn test_cover_is_a_fixpoint() {
        let schema = Schema::builder()
            .dependency(["A"], ["B", "C"])
            .dependency(["C", "B"], ["A", "D"])
            .dependency(["A", "D"], ["C"])
            .build()
            .unwrap();
        let once = minimal_cover(schema.dependencies());
        let twice = minimal_cover(&once);
        assert_eq!(once, twice);
    }
}
