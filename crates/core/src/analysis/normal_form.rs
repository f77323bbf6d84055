//! Normal-form classification.
//!
//! The classifier works on a minimal cover `Fc` of the schema's
//! dependencies, so every dependency has the form `X -> A` with `A ∉ X`:
//!
//! - **2NF** is violated by `X -> A` when `X` is a proper subset of some
//!   candidate key and `A` is not prime.
//! - **3NF** is violated by `X -> A` when `X` is not a superkey and `A` is
//!   not prime.
//! - **BCNF** is violated by `X -> A` when `X` is not a superkey.
//!
//! The reported level is the strongest one without violations; first normal
//! form is assumed.

use alloc::vec::Vec;

use super::closure::{closure, is_superkey};
use super::cover::minimal_cover;
use super::keys::{candidate_keys, prime_attributes};
use crate::attribute::AttributeSet;
use crate::budget::Budget;
use crate::dependency::FunctionalDependency;
use crate::error::Error;
use crate::schema::Schema;

/// Normal forms, ordered from weakest to strongest.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalForm {
    /// First normal form: atomic values, assumed for every schema.
    First,
    /// Second normal form: no partial dependency of a non-prime attribute on a key.
    Second,
    /// Third normal form: no transitive dependency of a non-prime attribute on a key.
    Third,
    /// Boyce-Codd normal form: every determinant is a superkey.
    BoyceCodd,
}

impl core::fmt::Display for NormalForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::First => "1NF",
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
        })
    }
}

/// Result of [`classify`]: the level reached and the dependencies that keep
/// the schema from reaching each stronger level.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalFormReport {
    pub level: NormalForm,
    /// The candidate keys the classification is based on.
    pub keys: Vec<AttributeSet>,
    pub prime: AttributeSet,
    /// Partial dependencies (violate 2NF).
    pub second: Vec<FunctionalDependency>,
    /// Non-key determinants of non-prime attributes (violate 3NF).
    pub third: Vec<FunctionalDependency>,
    /// Non-key determinants (violate BCNF).
    pub boyce_codd: Vec<FunctionalDependency>,
}

impl NormalFormReport {
    /// Violations of `level`; empty for [`NormalForm::First`].
    #[must_use]
    pub fn violations(&self, level: NormalForm) -> &[FunctionalDependency] {
        match level {
            NormalForm::First => &[],
            NormalForm::Second => &self.second,
            NormalForm::Third => &self.third,
            NormalForm::BoyceCodd => &self.boyce_codd,
        }
    }

    #[must_use]
    pub fn satisfies(&self, level: NormalForm) -> bool {
        self.level >= level
    }
}

/// Classifies `schema` given its candidate `keys`.
#[must_use]
pub fn classify(schema: &Schema, keys: &[AttributeSet]) -> NormalFormReport {
    let prime = prime_attributes(keys);
    let cover = minimal_cover(schema.dependencies());

    let mut second = Vec::new();
    let mut third = Vec::new();
    let mut boyce_codd = Vec::new();

    for fd in cover.iter().filter(|fd| !fd.is_trivial()) {
        let non_prime = !fd.rhs.is_subset(prime);
        let superkey = is_superkey(schema, fd.lhs);

        if non_prime && keys.iter().any(|key| fd.lhs.is_proper_subset(*key)) {
            second.push(*fd);
        }
        if !superkey {
            if non_prime {
                third.push(*fd);
            }
            boyce_codd.push(*fd);
        }
    }

    add_derived_partial_dependencies(schema, keys, prime, &mut second);

    let level = if !second.is_empty() {
        NormalForm::First
    } else if !third.is_empty() {
        NormalForm::Second
    } else if !boyce_codd.is_empty() {
        NormalForm::Third
    } else {
        NormalForm::BoyceCodd
    };

    tracing::debug!(
        %level,
        second = second.len(),
        third = third.len(),
        boyce_codd = boyce_codd.len(),
        "normal form classified"
    );

    NormalFormReport {
        level,
        keys: keys.to_vec(),
        prime,
        second,
        third,
        boyce_codd,
    }
}

/// Adds partial dependencies that only follow by transitivity.
///
/// A non-prime `A` depends on a proper subset of key `K` iff it lies in the
/// closure of some `K ∖ {x}`, so only those maximal subsets are closed. Each
/// hit is reported with its left-hand side shrunk to a minimal determinant
/// of `A` inside `K ∖ {x}`.
fn add_derived_partial_dependencies(
    schema: &Schema,
    keys: &[AttributeSet],
    prime: AttributeSet,
    second: &mut Vec<FunctionalDependency>,
) {
    let dependencies = schema.dependencies();
    for key in keys {
        for dropped in key.iter() {
            let subset = key.without(dropped);
            let reached = closure(subset, dependencies)
                .difference(subset)
                .difference(prime);
            for attribute in reached.iter() {
                let target = AttributeSet::singleton(attribute);
                let lhs = subset.iter().fold(subset, |lhs, member| {
                    let smaller = lhs.without(member);
                    if closure(smaller, dependencies).is_superset(target) {
                        smaller
                    } else {
                        lhs
                    }
                });
                let fd = FunctionalDependency::new(lhs, target);
                if !second.contains(&fd) {
                    tracing::trace!(key = key.len(), "derived partial dependency");
                    second.push(fd);
                }
            }
        }
    }
}

/// Computes the candidate keys of `schema`, then classifies it.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] from the key search.
pub fn normal_form(schema: &Schema, budget: &Budget) -> Result<NormalFormReport, Error> {
    let keys = candidate_keys(schema, budget)?;
    Ok(classify(schema, &keys))
}
