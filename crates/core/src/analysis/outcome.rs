use alloc::vec::Vec;
use core::fmt::{Formatter, Result};

use super::decomposition::preservation::PreservationReport;
use super::decomposition::Decomposition;
use super::normal_form::{NormalForm, NormalFormReport};
use crate::attribute::{AttributeSet, Universe};
use crate::dependency::FdSet;
use crate::display::Render;

/// The answer to a [`Problem`](super::Problem).
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Closure(AttributeSet),
    Cover(FdSet),
    /// Candidate keys, smallest first.
    Keys(Vec<AttributeSet>),
    Equivalent(bool),
    NormalForm(NormalFormReport),
    LosslessJoin(bool),
    Preservation(PreservationReport),
    /// A 3NF synthesis or BCNF decomposition.
    Decomposition(Decomposition),
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl Render for NormalFormReport {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.level)?;
        for level in [NormalForm::Second, NormalForm::Third, NormalForm::BoyceCodd] {
            let violations = self.violations(level);
            if violations.is_empty() {
                continue;
            }
            write!(f, "\n  violates {level}:")?;
            for fd in violations {
                write!(f, "\n    ")?;
                fd.render(universe, f)?;
            }
        }
        Ok(())
    }
}

impl Render for PreservationReport {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", yes_no(self.preserved))?;
        for fd in &self.lost {
            write!(f, "\n  lost: ")?;
            fd.render(universe, f)?;
        }
        Ok(())
    }
}

impl Render for Outcome {
    fn render(&self, universe: &Universe, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Closure(set) => set.render(universe, f),
            Self::Cover(cover) => cover.render(universe, f),
            Self::Keys(keys) => {
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    key.render(universe, f)?;
                }
                Ok(())
            }
            Self::Equivalent(value) | Self::LosslessJoin(value) => {
                write!(f, "{}", yes_no(*value))
            }
            Self::NormalForm(report) => report.render(universe, f),
            Self::Preservation(report) => report.render(universe, f),
            Self::Decomposition(decomposition) => decomposition.render(universe, f),
        }
    }
}
