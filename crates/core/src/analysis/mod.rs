use alloc::vec::Vec;

use crate::attribute::AttributeSet;
use crate::budget::Budget;
use crate::dependency::FdSet;
use crate::error::Error;
use crate::schema::Schema;

pub mod closure;
pub mod cover;
pub mod decomposition;
pub mod equivalence;
pub mod keys;
pub mod normal_form;
pub mod outcome;
mod search;

pub use decomposition::Decomposition;
pub use normal_form::{NormalForm, NormalFormReport};
pub use outcome::Outcome;

/// The problems the engine answers, one per operation.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Closure of the given attribute set.
    Closure(AttributeSet),
    MinimalCover,
    CandidateKeys,
    /// Whether the schema's dependencies are equivalent to the given set.
    Equivalence(FdSet),
    NormalForm,
    LosslessJoin(Decomposition),
    DependencyPreservation(Decomposition),
    /// Bernstein 3NF synthesis.
    Synthesis,
    BcnfDecomposition,
}

/// Solves `problem` for `schema`.
///
/// Every call is an independent, synchronous computation over immutable
/// values; calls may run concurrently on separate threads without any
/// coordination.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] for the problems that search
/// exponentially many candidates (keys, normal form, lossless join,
/// preservation, BCNF decomposition). Closure, minimal cover, equivalence and
/// synthesis never fail.
pub fn analyze(schema: &Schema, problem: Problem, budget: &Budget) -> Result<Outcome, Error> {
    tracing::debug!(
        attributes = schema.attributes().len(),
        dependencies = schema.dependencies().len(),
        ?problem,
        "analyzing schema"
    );

    let outcome = match problem {
        Problem::Closure(attributes) => {
            Outcome::Closure(closure::closure(attributes, schema.dependencies()))
        }
        Problem::MinimalCover => Outcome::Cover(cover::minimal_cover(schema.dependencies())),
        Problem::CandidateKeys => Outcome::Keys(keys::candidate_keys(schema, budget)?),
        Problem::Equivalence(other) => {
            Outcome::Equivalent(equivalence::are_equivalent(schema.dependencies(), &other))
        }
        Problem::NormalForm => Outcome::NormalForm(normal_form::normal_form(schema, budget)?),
        Problem::LosslessJoin(decomposition) => Outcome::LosslessJoin(
            decomposition::is_lossless_join(schema, &decomposition, budget)?,
        ),
        Problem::DependencyPreservation(decomposition) => Outcome::Preservation(
            decomposition::dependency_preservation(schema, &decomposition, budget)?,
        ),
        Problem::Synthesis => Outcome::Decomposition(decomposition::synthesize_3nf(schema)),
        Problem::BcnfDecomposition => {
            Outcome::Decomposition(decomposition::decompose_bcnf(schema, budget)?)
        }
    };
    Ok(outcome)
}

/// Classifies every sub-relation of `decomposition` against the schema's
/// dependencies projected onto it.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] from projection or key search.
pub fn classify_relations(
    schema: &Schema,
    decomposition: &Decomposition,
    budget: &Budget,
) -> Result<Vec<NormalFormReport>, Error> {
    decomposition
        .iter()
        .map(|relation| {
            let projected = decomposition::project(schema.dependencies(), *relation, budget)?;
            normal_form::normal_form(&schema.restrict(*relation, projected), budget)
        })
        .collect()
}
