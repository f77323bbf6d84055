//! Rendering engine values with attribute names.
//!
//! Sets print as `{A, B}`, dependencies as `A B -> C`, decompositions as
//! `{A, B} | {A, C}`.

use alloc::vec::Vec;
use core::fmt::{Display, Formatter, Result};

use crate::analysis::decomposition::Decomposition;
use crate::attribute::{AttributeSet, Universe};
use crate::dependency::{FdSet, FunctionalDependency};

/// A value that can be printed once attribute names are known.
pub trait Render {
    /// Writes `self` to `f` using the names in `universe`.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result;
}

/// A [`Render`] value paired with its [`Universe`], implementing [`Display`].
pub struct Named<'a, T: ?Sized> {
    universe: &'a Universe,
    value: &'a T,
}

impl<'a, T: Render + ?Sized> Named<'a, T> {
    pub const fn new(universe: &'a Universe, value: &'a T) -> Self {
        Self { universe, value }
    }
}

impl<T: Render + ?Sized> Display for Named<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.value.render(self.universe, f)
    }
}

fn write_names(set: AttributeSet, universe: &Universe, f: &mut Formatter<'_>) -> Result {
    let names: Vec<&str> = universe.names_of(set).collect();
    write!(f, "{}", names.join(" "))
}

impl Render for AttributeSet {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        let names: Vec<&str> = universe.names_of(*self).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl Render for FunctionalDependency {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        write_names(self.lhs, universe, f)?;
        write!(f, " -> ")?;
        write_names(self.rhs, universe, f)
    }
}

impl Render for FdSet {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        for (i, dependency) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            dependency.render(universe, f)?;
        }
        Ok(())
    }
}

impl Render for [AttributeSet] {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        for (i, set) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            set.render(universe, f)?;
        }
        Ok(())
    }
}

impl Render for Decomposition {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        self.relations().render(universe, f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::schema::Schema;

    #[test]
    fn test_render_with_names() {
        let schema = Schema::builder()
            .dependency(["Emp", "Dept"], ["Mgr", "Floor"])
            .build()
            .unwrap();
        let fd = schema.dependencies().as_slice()[0];
        assert_eq!(schema.named(&fd).to_string(), "Emp Dept -> Mgr Floor");
        assert_eq!(
            schema.named(&fd.lhs).to_string(),
            "{Emp, Dept}"
        );
        assert_eq!(
            schema.named(schema.dependencies()).to_string(),
            "Emp Dept -> Mgr Floor"
        );
    }
}
