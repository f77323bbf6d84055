//! Lossless-join test.
//!
//! A two-way decomposition `{R1, R2}` is lossless iff the shared attributes
//! determine one side: `(R1 ∩ R2)⁺ ⊇ R1` or `(R1 ∩ R2)⁺ ⊇ R2`.
//!
//! Larger decompositions are tested with the chase. The tableau has one row
//! per sub-relation and one column per attribute. A cell holds the
//! distinguished symbol when the attribute belongs to the row's
//! sub-relation, and a symbol unique to the cell otherwise. For every
//! dependency `X -> A`, rows that agree on all of `X` are made to agree on
//! `A`, keeping the distinguished symbol when one of them has it. The
//! decomposition is lossless iff some row is entirely distinguished once a
//! full pass changes nothing.

use alloc::vec::Vec;

use super::Decomposition;
use crate::analysis::closure::closure;
use crate::attribute::{Attribute, AttributeSet};
use crate::budget::Budget;
use crate::error::Error;
use crate::schema::Schema;

/// Symbol of the tableau; `DISTINGUISHED` is shared by every row.
type Symbol = u32;

const DISTINGUISHED: Symbol = 0;

/// Tests whether joining the sub-relations of `decomposition` always
/// reconstructs the original relation.
///
/// # Errors
///
/// [`Error::SearchBudgetExceeded`] if the chase runs out of steps or time.
pub fn is_lossless_join(
    schema: &Schema,
    decomposition: &Decomposition,
    budget: &Budget,
) -> Result<bool, Error> {
    let universal = schema.attributes();
    let relations = decomposition.relations();

    let lossless = match relations {
        [] => universal.is_empty(),
        [only] => universal.is_subset(*only),
        [left, right] => {
            let shared = closure(left.intersection(*right), schema.dependencies());
            universal.is_subset(left.union(*right))
                && (shared.is_superset(*left) || shared.is_superset(*right))
        }
        _ => Tableau::new(universal, relations).chase(schema, budget)?,
    };

    tracing::debug!(
        relations = relations.len(),
        lossless,
        "lossless-join test"
    );
    Ok(lossless)
}

struct Tableau {
    columns: Vec<Attribute>,
    rows: Vec<Vec<Symbol>>,
}

impl Tableau {
    fn new(universal: AttributeSet, relations: &[AttributeSet]) -> Self {
        let columns: Vec<Attribute> = universal.iter().collect();
        let mut next: Symbol = DISTINGUISHED;
        let rows = relations
            .iter()
            .map(|relation| {
                columns
                    .iter()
                    .map(|&attribute| {
                        if relation.contains(attribute) {
                            DISTINGUISHED
                        } else {
                            next += 1;
                            next
                        }
                    })
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    fn column_of(&self, attribute: Attribute) -> Option<usize> {
        self.columns.iter().position(|&column| column == attribute)
    }

    fn chase(&mut self, schema: &Schema, budget: &Budget) -> Result<bool, Error> {
        let mut meter = budget.meter();
        // Column indices of each dependency's sides, resolved once.
        let dependencies: Vec<(Vec<usize>, Vec<usize>)> = schema
            .dependencies()
            .iter()
            .map(|fd| {
                let columns = |set: AttributeSet| -> Vec<usize> {
                    set.iter().filter_map(|a| self.column_of(a)).collect()
                };
                (columns(fd.lhs), columns(fd.rhs))
            })
            .collect();

        let mut pass = 0u32;
        loop {
            meter.tick()?;
            let mut changed = false;
            for (lhs, rhs) in &dependencies {
                for i in 0..self.rows.len() {
                    for j in i + 1..self.rows.len() {
                        if lhs.iter().all(|&c| self.rows[i][c] == self.rows[j][c]) {
                            for &c in rhs {
                                changed |= self.equate(c, self.rows[i][c], self.rows[j][c]);
                            }
                        }
                    }
                }
            }

            tracing::trace!(pass, changed, "chase pass");

            if self.has_distinguished_row() {
                return Ok(true);
            }
            if !changed {
                return Ok(false);
            }
            pass += 1;
        }
    }

    /// Renames the losing symbol to the winning one across `column`.
    fn equate(&mut self, column: usize, a: Symbol, b: Symbol) -> bool {
        if a == b {
            return false;
        }
        // The distinguished symbol is the smallest, so it always wins.
        let (keep, replace) = if a < b { (a, b) } else { (b, a) };
        for row in &mut self.rows {
            if row[column] == replace {
                row[column] = keep;
            }
        }
        true
    }

    fn has_distinguished_row(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.iter().all(|&symbol| symbol == DISTINGUISHED))
    }
}
