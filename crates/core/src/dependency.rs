use alloc::vec::Vec;
use core::fmt::{Debug, Formatter, Result};

use crate::attribute::AttributeSet;

/// A functional dependency `lhs -> rhs`.
///
/// Both sides are non-empty when built through a [`Schema`](crate::schema::Schema).
/// Attributes present on both sides are tolerated; they are redundant on the
/// right-hand side.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FunctionalDependency {
    pub lhs: AttributeSet,
    pub rhs: AttributeSet,
}

impl FunctionalDependency {
    #[must_use]
    pub const fn new(lhs: AttributeSet, rhs: AttributeSet) -> Self {
        Self { lhs, rhs }
    }

    /// `true` if the right-hand side is contained in the left-hand side.
    #[must_use]
    pub const fn is_trivial(&self) -> bool {
        self.rhs.is_subset(self.lhs)
    }

    /// Splits into one dependency per right-hand side attribute.
    pub fn split(self) -> impl Iterator<Item = Self> {
        self.rhs
            .iter()
            .map(move |attribute| Self::new(self.lhs, AttributeSet::singleton(attribute)))
    }

    /// All attributes mentioned on either side.
    #[must_use]
    pub const fn attributes(&self) -> AttributeSet {
        self.lhs.union(self.rhs)
    }
}

impl Debug for FunctionalDependency {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{:?}->{:?}", self.lhs, self.rhs)
    }
}

/// An ordered, deduplicated collection of functional dependencies.
///
/// The order carries no meaning for closures; it only fixes the processing
/// order of the reduction algorithms so that identical input always yields
/// identical output.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FdSet {
    dependencies: Vec<FunctionalDependency>,
}

impl FdSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dependencies: Vec::new(),
        }
    }

    /// Appends `dependency` unless an identical one is already present.
    ///
    /// Returns `true` if it was appended.
    pub fn insert(&mut self, dependency: FunctionalDependency) -> bool {
        if self.dependencies.contains(&dependency) {
            false
        } else {
            self.dependencies.push(dependency);
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    #[must_use]
    pub fn contains(&self, dependency: &FunctionalDependency) -> bool {
        self.dependencies.contains(dependency)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, FunctionalDependency> {
        self.dependencies.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FunctionalDependency] {
        &self.dependencies
    }

    /// Every attribute mentioned by some dependency.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet {
        self.iter()
            .fold(AttributeSet::empty(), |acc, fd| acc.union(fd.attributes()))
    }

    /// A new set holding the dependencies of `self` followed by those of
    /// `other` not already present.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.extend(other.iter().copied());
        merged
    }
}

impl Debug for FdSet {
    fn fmt(&self, f: &mut Formatter) -> Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<FunctionalDependency> for FdSet {
    fn extend<I: IntoIterator<Item = FunctionalDependency>>(&mut self, iter: I) {
        for dependency in iter {
            self.insert(dependency);
        }
    }
}

impl FromIterator<FunctionalDependency> for FdSet {
    fn from_iter<I: IntoIterator<Item = FunctionalDependency>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a FdSet {
    type Item = &'a FunctionalDependency;
    type IntoIter = core::slice::Iter<'a, FunctionalDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    fn set(indices: &[usize]) -> AttributeSet {
        indices.iter().copied().map(Attribute::new).collect()
    }

    #[test]
    fn test_insert_deduplicates_and_keeps_order() {
        let first = FunctionalDependency::new(set(&[1]), set(&[2]));
        let second = FunctionalDependency::new(set(&[0]), set(&[1]));
        let fds: FdSet = [first, second, first].into_iter().collect();
        assert_eq!(fds.len(), 2);
        assert_eq!(fds.as_slice(), &[first, second]);
    }

    #[test]
    fn test_split() {
        let fd = FunctionalDependency::new(set(&[0]), set(&[1, 2]));
        let parts: Vec<_> = fd.split().collect();
        assert_eq!(
            parts,
            vec![
                FunctionalDependency::new(set(&[0]), set(&[1])),
                FunctionalDependency::new(set(&[0]), set(&[2])),
            ]
        );
    }

    #[test]
    fn test_trivial() {
        assert!(FunctionalDependency::new(set(&[0, 1]), set(&[1])).is_trivial());
        assert!(!FunctionalDependency::new(set(&[0, 1]), set(&[1, 2])).is_trivial());
    }
}
