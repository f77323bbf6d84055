//! Schemas: a universe of interned attributes plus a set of dependencies.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::analysis::decomposition::Decomposition;
use crate::attribute::{AttributeSet, Universe};
use crate::dependency::{FdSet, FunctionalDependency};
use crate::display::{Named, Render};
use crate::error::{Error, MalformedInput};

/// A relation schema: its attributes and the dependencies that hold on it.
///
/// The attribute set is the union of every attribute declared or mentioned in
/// a dependency. A schema is an immutable value; every analysis produces new
/// values from it.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    universe: Universe,
    attributes: AttributeSet,
    dependencies: FdSet,
}

/// Collects raw tokens and interns them in one go.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    attributes: Vec<String>,
    dependencies: Vec<(Vec<String>, Vec<String>)>,
}

impl SchemaBuilder {
    /// Declares an attribute, used or not by a dependency.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    #[must_use]
    pub fn attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn dependency<L, R, S, T>(mut self, lhs: L, rhs: R) -> Self
    where
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.dependencies.push((
            lhs.into_iter().map(Into::into).collect(),
            rhs.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Validates and interns every token.
    ///
    /// Declared attributes are interned first, then dependency attributes in
    /// the order they appear. Duplicate dependencies are dropped.
    ///
    /// # Errors
    ///
    /// - [`MalformedInput::InvalidToken`] for a token outside `[A-Za-z0-9]+`.
    /// - [`MalformedInput::EmptyLeftSide`] / [`MalformedInput::EmptyRightSide`]
    ///   for a dependency with an empty side.
    /// - [`Error::TooManyAttributes`] if more than
    ///   [`CAPACITY`](crate::attribute::CAPACITY) distinct names are used.
    pub fn build(self) -> Result<Schema, Error> {
        self.intern().map_err(|error| match error {
            Error::TooManyAttributes { capacity, .. } => Error::TooManyAttributes {
                capacity,
                actual: self.distinct_names(),
            },
            error => error,
        })
    }

    fn distinct_names(&self) -> usize {
        let sides = self.dependencies.iter().flat_map(|(lhs, rhs)| lhs.iter().chain(rhs));
        self.attributes
            .iter()
            .chain(sides)
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len()
    }

    fn intern(&self) -> Result<Schema, Error> {
        let mut universe = Universe::new();
        for name in &self.attributes {
            universe.intern(name)?;
        }

        let mut dependencies = FdSet::new();
        for (lhs, rhs) in &self.dependencies {
            if lhs.is_empty() {
                return Err(MalformedInput::EmptyLeftSide { rhs: rhs.join(" ") }.into());
            }
            if rhs.is_empty() {
                return Err(MalformedInput::EmptyRightSide { lhs: lhs.join(" ") }.into());
            }
            let lhs = intern_all(&mut universe, lhs)?;
            let rhs = intern_all(&mut universe, rhs)?;
            dependencies.insert(FunctionalDependency::new(lhs, rhs));
        }

        tracing::debug!(
            attributes = universe.len(),
            dependencies = dependencies.len(),
            "schema built"
        );

        Ok(Schema {
            attributes: universe.all(),
            universe,
            dependencies,
        })
    }
}

fn intern_all(universe: &mut Universe, tokens: &[String]) -> Result<AttributeSet, Error> {
    tokens.iter().try_fold(AttributeSet::empty(), |acc, token| {
        universe.intern(token).map(|attribute| acc.with(attribute))
    })
}

impl Schema {
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    #[must_use]
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The universal attribute set of this schema.
    #[must_use]
    pub const fn attributes(&self) -> AttributeSet {
        self.attributes
    }

    #[must_use]
    pub const fn dependencies(&self) -> &FdSet {
        &self.dependencies
    }

    /// A schema over `attributes` sharing this schema's names, with the
    /// given dependencies.
    ///
    /// Used to analyse sub-relations of a decomposition against their
    /// projected dependencies.
    #[must_use]
    pub fn restrict(&self, attributes: AttributeSet, dependencies: FdSet) -> Self {
        Self {
            universe: self.universe.clone(),
            attributes,
            dependencies,
        }
    }

    /// Resolves attribute names supplied by a caller, such as a closure target.
    ///
    /// # Errors
    ///
    /// - [`MalformedInput::InvalidToken`] for a badly formed name.
    /// - [`Error::UnknownAttribute`] for a name outside this schema.
    pub fn attribute_set<I, S>(&self, names: I) -> Result<AttributeSet, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = self.universe.resolve(names)?;
        if let Some(outside) = set.difference(self.attributes).iter().next() {
            return Err(Error::UnknownAttribute(
                self.universe.name(outside).to_string(),
            ));
        }
        Ok(set)
    }

    /// Resolves a second dependency list against this schema's attributes,
    /// for instance the other side of an equivalence test.
    ///
    /// # Errors
    ///
    /// Same as [`attribute_set`](Self::attribute_set), plus the empty-side
    /// variants of [`MalformedInput`].
    pub fn dependency_set<I, L, R, S, T>(&self, dependencies: I) -> Result<FdSet, Error>
    where
        I: IntoIterator<Item = (L, R)>,
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut set = FdSet::new();
        for (lhs, rhs) in dependencies {
            let lhs: Vec<S> = lhs.into_iter().collect();
            let rhs: Vec<T> = rhs.into_iter().collect();
            if lhs.is_empty() {
                return Err(MalformedInput::EmptyLeftSide {
                    rhs: join(&rhs),
                }
                .into());
            }
            if rhs.is_empty() {
                return Err(MalformedInput::EmptyRightSide {
                    lhs: join(&lhs),
                }
                .into());
            }
            set.insert(FunctionalDependency::new(
                self.attribute_set(&lhs)?,
                self.attribute_set(&rhs)?,
            ));
        }
        Ok(set)
    }

    /// Resolves a decomposition given as lists of attribute names.
    ///
    /// # Errors
    ///
    /// - [`MalformedInput::EmptyRelation`] if a sub-relation is empty.
    /// - [`MalformedInput::UncoveredAttributes`] if the sub-relations do not
    ///   cover every attribute of the schema.
    /// - [`Error::UnknownAttribute`] / [`MalformedInput::InvalidToken`] for
    ///   bad names.
    pub fn decomposition<I, R, S>(&self, relations: I) -> Result<Decomposition, Error>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = Vec::new();
        for (position, relation) in relations.into_iter().enumerate() {
            let set = self.attribute_set(relation)?;
            if set.is_empty() {
                return Err(MalformedInput::EmptyRelation(position).into());
            }
            resolved.push(set);
        }
        let decomposition = Decomposition::new(resolved);
        let missing = self.attributes.difference(decomposition.attributes());
        if !missing.is_empty() {
            return Err(
                MalformedInput::UncoveredAttributes(self.named(&missing).to_string()).into(),
            );
        }
        Ok(decomposition)
    }

    /// Wraps `value` so that it displays with this schema's attribute names.
    pub const fn named<'a, T: Render + ?Sized>(&'a self, value: &'a T) -> Named<'a, T> {
        Named::new(&self.universe, value)
    }

    /// A serialization that is identical for schemas with the same attribute
    /// names and the same dependencies, regardless of input order.
    ///
    /// Suitable as a memoization key for an external result cache.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let sorted_names = |set: AttributeSet| {
            let mut names: Vec<&str> = self.universe.names_of(set).collect();
            names.sort_unstable();
            names.join(",")
        };

        let mut dependencies: Vec<String> = self
            .dependencies
            .iter()
            .flat_map(|fd| fd.split())
            .filter(|fd| !fd.is_trivial())
            .map(|fd| alloc::format!("{}->{}", sorted_names(fd.lhs), sorted_names(fd.rhs)))
            .collect();
        dependencies.sort_unstable();
        dependencies.dedup();

        alloc::format!(
            "{};{}",
            sorted_names(self.attributes),
            dependencies.join(";")
        )
    }
}

fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Schema {
        Schema::builder()
            .dependency(["A"], ["B"])
            .dependency(["B"], ["C"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_attributes_follow_first_appearance() {
        let schema = Schema::builder()
            .attribute("Z")
            .dependency(["B", "A"], ["C"])
            .build()
            .unwrap();
        let names: Vec<&str> = schema.universe().names().collect();
        assert_eq!(names, vec!["Z", "B", "A", "C"]);
        assert_eq!(schema.attributes().len(), 4);
    }

    #[test]
    fn test_duplicate_dependencies_are_dropped() {
        let schema = Schema::builder()
            .dependency(["A"], ["B"])
            .dependency(["A"], ["B"])
            .build()
            .unwrap();
        assert_eq!(schema.dependencies().len(), 1);
    }

    #[test]
    fn test_empty_sides_are_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Schema::builder().dependency(empty, ["B"]).build(),
            Err(Error::MalformedInput(MalformedInput::EmptyLeftSide {
                rhs: "B".to_string()
            }))
        );
        assert_eq!(
            Schema::builder().dependency(["A", "B"], empty).build(),
            Err(Error::MalformedInput(MalformedInput::EmptyRightSide {
                lhs: "A B".to_string()
            }))
        );
    }

    #[test]
    fn test_invalid_token_is_rejected_before_analysis() {
        let result = Schema::builder().dependency(["A"], ["B-C"]).build();
        assert_eq!(
            result,
            Err(Error::MalformedInput(MalformedInput::InvalidToken(
                "B-C".to_string()
            )))
        );
    }

    #[test]
    fn test_too_many_attributes_reports_distinct_count() {
        let names: Vec<String> = (0..130).map(|i| format!("A{i}")).collect();
        let result = Schema::builder()
            .attribute("A0")
            .dependency(&names[..65], &names[65..])
            .dependency(["A129"], ["A0"])
            .build();
        assert_eq!(
            result,
            Err(Error::TooManyAttributes {
                capacity: crate::attribute::CAPACITY,
                actual: 130,
            })
        );
    }

    #[test]
    fn test_unknown_attribute() {
        assert_eq!(
            abc().attribute_set(["A", "D"]),
            Err(Error::UnknownAttribute("D".to_string()))
        );
    }

    #[test]
    fn test_decomposition_must_cover() {
        let schema = abc();
        assert!(schema.decomposition([vec!["A", "B"], vec!["B", "C"]]).is_ok());
        assert_eq!(
            schema.decomposition([vec!["A", "B"]]),
            Err(Error::MalformedInput(MalformedInput::UncoveredAttributes(
                "{C}".to_string()
            )))
        );
        assert_eq!(
            schema.decomposition([vec!["A", "B", "C"], vec![]]),
            Err(Error::MalformedInput(MalformedInput::EmptyRelation(1)))
        );
    }

    #[test]
    fn test_canonical_key_ignores_order() {
        let forward = Schema::builder()
            .dependency(["A", "B"], ["C"])
            .dependency(["C"], ["D"])
            .build()
            .unwrap();
        let backward = Schema::builder()
            .dependency(["C"], ["D"])
            .dependency(["B", "A"], ["C"])
            .build()
            .unwrap();
        assert_eq!(forward.canonical_key(), backward.canonical_key());
        assert_eq!(forward.canonical_key(), "A,B,C,D;A,B->C;C->D");
    }
}
