//! Functional-dependency analysis and schema normalization.
//!
//! `fdnorm_core` answers the classical questions of relational design theory
//! for a schema given as attributes plus functional dependencies (FDs):
//!
//! 1. **Closure** -- the attributes determined by a set `X` (`X⁺`).
//! 2. **Minimal cover** -- an equivalent FD set with single-attribute
//!    right-hand sides, no extraneous attributes and no redundant FDs.
//! 3. **Candidate keys** -- all minimal superkeys, found by a pruned search.
//! 4. **Equivalence** -- whether two FD sets imply each other.
//! 5. **Normal form** -- the strongest of 2NF, 3NF and BCNF the schema
//!    satisfies, with the violating FDs of every level it misses.
//! 6. **Decompositions** -- lossless-join (chase) and dependency-preservation
//!    tests, Bernstein's 3NF synthesis and BCNF decomposition.
//!
//! Closure, cover, equivalence and synthesis are polynomial. Key
//! enumeration, FD projection, BCNF decomposition and the chase can be
//! exponential and are bounded by a [`Budget`]: when it runs out they fail
//! with [`Error::SearchBudgetExceeded`] instead of hanging.
//!
//! # Entry point
//!
//! Attribute names are interned once, when the [`Schema`] is built; all
//! algorithms then work on bitset [`AttributeSet`](attribute::AttributeSet)s.
//! [`analyze()`] dispatches a [`Problem`] and returns an [`Outcome`].
//!
//! ```rust
//! use fdnorm_core::{analyze, Budget, Outcome, Problem, Schema};
//!
//! let schema = Schema::builder()
//!     .dependency(["A"], ["B"])
//!     .dependency(["B"], ["C"])
//!     .build()
//!     .unwrap();
//!
//! let outcome = analyze(&schema, Problem::CandidateKeys, &Budget::default()).unwrap();
//! assert_eq!(schema.named(&outcome).to_string(), "{A}");
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- `Serialize`/`Deserialize` derives on the public types.
//! - **`std`** -- wall-clock timeouts in [`Budget`].
//!
//! Without `std` the crate is `no_std` (requires `alloc`). The text format
//! lives in the separate `fdnorm_parser` crate.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
extern crate alloc;

pub mod analysis;
pub mod attribute;
pub mod budget;
pub mod dependency;
pub mod display;
pub mod error;
pub mod schema;

pub use analysis::{analyze, Outcome, Problem};
pub use budget::Budget;
pub use error::Error;
pub use schema::Schema;
