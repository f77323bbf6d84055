//! Raw, un-interned results of parsing.
//!
//! The parser only tokenizes. Token validation and interning happen when a
//! [`SchemaSource`] is built into an [`fdnorm_core::Schema`], so every
//! malformed name is reported by the core with its own error kind.

use fdnorm_core::dependency::FdSet;
use fdnorm_core::schema::SchemaBuilder;
use fdnorm_core::{Error, Schema};

/// `lhs -> rhs` as written.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySource {
    pub lhs: Vec<String>,
    pub rhs: Vec<String>,
}

/// A parsed schema file: declared attributes and dependencies, in order.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSource {
    pub attributes: Vec<String>,
    pub dependencies: Vec<DependencySource>,
}

/// Splits every token into one token per character, for the textbook
/// notation where `AB -> C` means `{A, B} -> {C}`.
#[must_use]
pub fn compact(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .flat_map(|token| token.chars().map(String::from))
        .collect()
}

impl DependencySource {
    #[must_use]
    pub fn compact(&self) -> Self {
        Self {
            lhs: compact(&self.lhs),
            rhs: compact(&self.rhs),
        }
    }
}

impl SchemaSource {
    /// Applies [`compact`] to every attribute list.
    #[must_use]
    pub fn compact(&self) -> Self {
        Self {
            attributes: compact(&self.attributes),
            dependencies: self
                .dependencies
                .iter()
                .map(DependencySource::compact)
                .collect(),
        }
    }

    #[must_use]
    pub fn builder(&self) -> SchemaBuilder {
        self.dependencies.iter().fold(
            Schema::builder().attributes(self.attributes.iter().cloned()),
            |builder, dependency| {
                builder.dependency(dependency.lhs.iter().cloned(), dependency.rhs.iter().cloned())
            },
        )
    }

    /// Validates and interns the source.
    ///
    /// # Errors
    ///
    /// Any input error of [`SchemaBuilder::build`].
    pub fn build(&self) -> Result<Schema, Error> {
        self.builder().build()
    }
}

/// Resolves parsed dependencies against an existing schema.
///
/// # Errors
///
/// Any input error of [`Schema::dependency_set`].
pub fn resolve_dependencies(
    schema: &Schema,
    dependencies: &[DependencySource],
) -> Result<FdSet, Error> {
    schema.dependency_set(
        dependencies
            .iter()
            .map(|dependency| (&dependency.lhs, &dependency.rhs)),
    )
}
