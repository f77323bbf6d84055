//! Bernstein's 3NF synthesis.
//!
//! 1. Compute a minimal cover `Fc`.
//! 2. Group the dependencies of `Fc` by left-hand side; each group
//!    `X -> Y1 ∪ Y2 ∪ ...` yields the sub-relation `X ∪ Y1 ∪ Y2 ∪ ...`.
//! 3. If no sub-relation is a superkey of the schema, add one candidate key.
//! 4. Drop every sub-relation contained in another.
//!
//! The result is dependency-preserving, lossless and every sub-relation is
//! in 3NF by construction; nothing is re-verified here.

use alloc::vec::Vec;

use super::Decomposition;
use crate::analysis::closure::is_superkey;
use crate::analysis::cover::minimal_cover;
use crate::analysis::keys::find_key;
use crate::attribute::AttributeSet;
use crate::schema::Schema;

/// Synthesizes a 3NF decomposition of `schema`.
#[must_use]
pub fn synthesize_3nf(schema: &Schema) -> Decomposition {
    let cover = minimal_cover(schema.dependencies());

    // Groups in order of first appearance of their left-hand side.
    let mut groups: Vec<(AttributeSet, AttributeSet)> = Vec::new();
    for fd in &cover {
        match groups.iter_mut().find(|(lhs, _)| *lhs == fd.lhs) {
            Some((_, rhs)) => *rhs = rhs.union(fd.rhs),
            None => groups.push((fd.lhs, fd.rhs)),
        }
    }

    let mut relations: Vec<AttributeSet> = groups
        .into_iter()
        .map(|(lhs, rhs)| lhs.union(rhs))
        .collect();

    if !relations.iter().any(|relation| is_superkey(schema, *relation)) {
        let key = find_key(schema);
        tracing::debug!(key = key.len(), "3NF synthesis: adding a key relation");
        relations.push(key);
    }

    let decomposition = Decomposition::new(relations).without_subsumed();
    tracing::debug!(
        cover = cover.len(),
        relations = decomposition.len(),
        "3NF synthesis done"
    );
    decomposition
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_chain() {
        let schema = Schema::builder()
            .dependency(["A"], ["B"])
            .dependency(["B"], ["C"])
            .dependency(["C"], ["D"])
            .build()
            .unwrap();
        let decomposition = synthesize_3nf(&schema);
        assert_eq!(
            schema.named(&decomposition).to_string(),
            "{A, B} | {B, C} | {C, D}"
        );
    }

    #[test]
    fn test_key_relation_is_added() {
        let schema = Schema::builder()
            .dependency(["A"], ["B"])
            .dependency(["C"], ["D"])
            .build()
            .unwrap();
        let decomposition = synthesize_3nf(&schema);
        assert_eq!(
            schema.named(&decomposition).to_string(),
            "{A, B} | {C, D} | {A, C}"
        );
    }

    #[test]
    fn test_grouping_and_subsumption() {
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
        let decomposition = synthesize_3nf(&schema);
        assert_eq!(
            schema.named(&decomposition).to_string(),
            "{A, B, C, D} | {D, E, G} | {B, C, E}"
        );
    }

    #[test]
    fn test_no_dependencies() {
        let schema = Schema::builder().attributes(["A", "B"]).build().unwrap();
        let decomposition = synthesize_3nf(&schema);
        assert_eq!(decomposition.relations(), &[schema.attributes()]);
    }
}
