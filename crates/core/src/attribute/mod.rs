//! Interned attributes and bitset-backed attribute sets.
//!
//! Every attribute name of a schema is interned once, at the input boundary,
//! into an [`Attribute`] index (see [`Universe`]). From then on the engine
//! only manipulates [`AttributeSet`] values: fixed-width bit vectors over
//! the interned indices, so subset tests, unions and differences are single
//! word operations.

use core::fmt::{Debug, Formatter, Result};

pub mod universe;

pub use universe::Universe;

/// Maximum number of distinct attributes a schema can intern.
pub const CAPACITY: usize = u128::BITS as usize;

/// An interned attribute: an index into the [`Universe`] it was created by.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attribute(u8);

impl Attribute {
    /// # Panics
    ///
    /// Panics if `index` is not below [`CAPACITY`].
    #[must_use]
    pub fn new(index: usize) -> Self {
        assert!(index < CAPACITY, "attribute index {index} out of range");
        #[allow(clippy::cast_possible_truncation)]
        Self(index as u8)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    const fn bit(self) -> u128 {
        1u128 << self.0
    }
}

impl Debug for Attribute {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of attributes drawn from one [`Universe`].
///
/// Values are immutable in spirit: every set operation returns a new set.
/// Iteration yields members in interning order, which is the order the
/// attributes first appeared in the input.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet(u128);

impl AttributeSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn singleton(attribute: Attribute) -> Self {
        Self(attribute.bit())
    }

    /// The set of the first `len` interned attributes.
    #[must_use]
    pub const fn first(len: usize) -> Self {
        if len >= CAPACITY {
            Self(u128::MAX)
        } else {
            Self((1u128 << len) - 1)
        }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, attribute: Attribute) -> bool {
        self.0 & attribute.bit() != 0
    }

    #[must_use]
    pub const fn with(self, attribute: Attribute) -> Self {
        Self(self.0 | attribute.bit())
    }

    #[must_use]
    pub const fn without(self, attribute: Attribute) -> Self {
        Self(self.0 & !attribute.bit())
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    #[must_use]
    pub const fn is_proper_subset(self, other: Self) -> bool {
        self.is_subset(other) && self.0 != other.0
    }

    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter(self.0)
    }

    /// Compares two sets by size first, then member-wise in interning order.
    ///
    /// Candidate keys are returned in this order.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl Debug for AttributeSet {
    fn fmt(&self, f: &mut Formatter) -> Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl IntoIterator for AttributeSet {
    type Item = Attribute;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Iterator over the members of an [`AttributeSet`], lowest index first.
#[derive(Clone, Debug)]
pub struct Iter(u128);

impl Iterator for Iter {
    type Item = Attribute;

    fn next(&mut self) -> Option<Attribute> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Attribute::new(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}
