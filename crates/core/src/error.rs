use alloc::string::String;

use derive_more::{Display, From};

/// Error returned by the analysis engine.
///
/// Input problems ([`MalformedInput`](Self::MalformedInput),
/// [`UnknownAttribute`](Self::UnknownAttribute),
/// [`TooManyAttributes`](Self::TooManyAttributes)) are raised before any
/// algorithm runs. [`SearchBudgetExceeded`](Self::SearchBudgetExceeded) is
/// raised by the exponential searches when they run out of budget, so that
/// callers can offer to narrow the problem instead of retrying.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum Error {
    #[display("malformed input: {_0}")]
    MalformedInput(MalformedInput),
    /// A closure target or decomposition names an attribute that is not part
    /// of the schema.
    #[display("unknown attribute `{_0}`")]
    #[from(skip)]
    UnknownAttribute(String),
    /// The schema has more distinct attributes than an attribute set can hold.
    #[display("{actual} distinct attributes exceed the capacity of {capacity}")]
    #[from(skip)]
    TooManyAttributes { capacity: usize, actual: usize },
    #[display("search exceeded limits: {_0}")]
    SearchBudgetExceeded(Limit),
}

impl core::error::Error for Error {}

/// The specific way an input was malformed.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MalformedInput {
    /// An attribute token does not match `[A-Za-z0-9]+`.
    #[display("`{_0}` is not a valid attribute name (expected [A-Za-z0-9]+)")]
    InvalidToken(String),
    #[display("dependency `-> {rhs}` has an empty left-hand side")]
    EmptyLeftSide { rhs: String },
    #[display("dependency `{lhs} ->` has an empty right-hand side")]
    EmptyRightSide { lhs: String },
    /// Sub-relation number `_0` (0-based) of a decomposition is empty.
    #[display("relation #{_0} of the decomposition is empty")]
    EmptyRelation(usize),
    /// The union of a decomposition misses the listed attributes.
    #[display("decomposition does not cover {_0}")]
    UncoveredAttributes(String),
}

/// The limit a search ran into.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Limit {
    #[display("{actual} attributes to search over, the limit is {limit}")]
    Attributes { limit: usize, actual: usize },
    #[display("more than {limit} search steps")]
    Steps { limit: u64 },
    #[display("time limit of {millis} ms reached")]
    Deadline { millis: u128 },
}
