use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{Attribute, AttributeSet, CAPACITY};
use crate::error::{Error, MalformedInput};

/// Symbol table mapping attribute names to interned [`Attribute`]s.
///
/// Attributes are numbered in the order they are first interned, so
/// iterating an [`AttributeSet`] replays the order the caller wrote them in.
/// Names are case-sensitive.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    names: Vec<String>,
    index: HashMap<String, Attribute>,
}

/// Returns `true` if `token` is a well-formed attribute name.
#[must_use]
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl Universe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `token`, returning the existing attribute if it is already known.
    ///
    /// # Errors
    ///
    /// - [`MalformedInput::InvalidToken`] if `token` is not `[A-Za-z0-9]+`.
    /// - [`Error::TooManyAttributes`] if the universe is full.
    pub fn intern(&mut self, token: &str) -> Result<Attribute, Error> {
        if !is_valid_token(token) {
            return Err(MalformedInput::InvalidToken(token.to_string()).into());
        }
        if let Some(&attribute) = self.index.get(token) {
            return Ok(attribute);
        }
        if self.names.len() == CAPACITY {
            return Err(Error::TooManyAttributes {
                capacity: CAPACITY,
                actual: CAPACITY + 1,
            });
        }
        let attribute = Attribute::new(self.names.len());
        self.names.push(token.to_string());
        self.index.insert(token.to_string(), attribute);
        Ok(attribute)
    }

    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<Attribute> {
        self.index.get(token).copied()
    }

    /// Resolves a list of names against the universe without interning.
    ///
    /// # Errors
    ///
    /// - [`MalformedInput::InvalidToken`] for a badly formed name.
    /// - [`Error::UnknownAttribute`] for a well-formed name that was never interned.
    pub fn resolve<I, S>(&self, tokens: I) -> Result<AttributeSet, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().try_fold(AttributeSet::empty(), |acc, token| {
            let token = token.as_ref();
            if !is_valid_token(token) {
                return Err(MalformedInput::InvalidToken(token.to_string()).into());
            }
            self.lookup(token)
                .map(|attribute| acc.with(attribute))
                .ok_or_else(|| Error::UnknownAttribute(token.to_string()))
        })
    }

    /// Name of an interned attribute.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` was not interned by this universe.
    #[must_use]
    pub fn name(&self, attribute: Attribute) -> &str {
        &self.names[attribute.index()]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The set of every interned attribute.
    #[must_use]
    pub fn all(&self) -> AttributeSet {
        AttributeSet::first(self.names.len())
    }

    /// Names of the members of `set`, in interning order.
    pub fn names_of(&self, set: AttributeSet) -> impl Iterator<Item = &str> + '_ {
        set.iter().map(|attribute| self.name(attribute))
    }
}
