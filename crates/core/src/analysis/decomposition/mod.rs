//! Decompositions of a schema into sub-relations.
//!
//! - [`chase`]: lossless-join test (two-way shortcut and the general tableau).
//! - [`preservation`]: dependency projection and preservation test.
//! - [`synthesis`]: Bernstein's 3NF synthesis.
//! - [`bcnf`]: lossless BCNF decomposition by splitting on violations.

use alloc::vec::Vec;

use crate::attribute::AttributeSet;

pub mod bcnf;
pub mod chase;
pub mod preservation;
pub mod synthesis;

pub use bcnf::decompose_bcnf;
pub use chase::is_lossless_join;
pub use preservation::{dependency_preservation, preserves_dependencies, project};
pub use synthesis::synthesize_3nf;

/// An ordered list of sub-relations.
///
/// Sub-relations may overlap. A decomposition built through
/// [`Schema::decomposition`](crate::schema::Schema::decomposition) covers
/// every attribute of its schema.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decomposition {
    relations: Vec<AttributeSet>,
}

impl Decomposition {
    #[must_use]
    pub const fn new(relations: Vec<AttributeSet>) -> Self {
        Self { relations }
    }

    #[must_use]
    pub fn relations(&self) -> &[AttributeSet] {
        &self.relations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, AttributeSet> {
        self.relations.iter()
    }

    /// Union of all sub-relations.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.relations
            .iter()
            .fold(AttributeSet::empty(), |acc, relation| acc.union(*relation))
    }

    /// Drops every sub-relation contained in another one.
    ///
    /// Of two equal sub-relations the first is kept.
    #[must_use]
    pub fn without_subsumed(self) -> Self {
        let relations = &self.relations;
        let kept = relations
            .iter()
            .enumerate()
            .filter(|&(i, relation)| {
                !relations.iter().enumerate().any(|(j, other)| {
                    i != j
                        && relation.is_subset(*other)
                        && (relation != other || j < i)
                })
            })
            .map(|(_, relation)| *relation)
            .collect();
        Self::new(kept)
    }
}

impl FromIterator<AttributeSet> for Decomposition {
    fn from_iter<I: IntoIterator<Item = AttributeSet>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a AttributeSet;
    type IntoIter = core::slice::Iter<'a, AttributeSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
