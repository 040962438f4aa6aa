#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Fixed-width clause encoding.
//!
//! A clause stores one `Trit` per variable of the formula, so every clause of
//! a formula has exactly `num_vars` entries. Clauses are built once from
//! their DIMACS literals and never mutated afterwards.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Trit, Variable, variable_of};
use core::ops::Index;

/// One clause: the polarity of every variable, `Unassigned` where absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause(Vec<Trit>);

impl Clause {
    /// Builds a clause over `num_vars` variables from signed DIMACS literals.
    ///
    /// A `0` ends the literal scan; anything after it is ignored. Positions not
    /// mentioned stay `Unassigned`. Literals must lie in `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: usize, literals: &[i32]) -> Self {
        let mut trits = vec![Trit::Unassigned; num_vars];

        for &literal in literals.iter().take_while(|&&l| l != 0) {
            trits[variable_of(literal)] = Trit::of_literal(literal);
        }

        Self(trits)
    }

    /// Number of positions; always the formula's variable count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Only true in a formula without variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every position, absent variables included.
    pub fn iter(&self) -> impl Iterator<Item = &Trit> {
        self.0.iter()
    }

    /// Variables that occur in the clause, with their polarity.
    pub fn literals(&self) -> impl Iterator<Item = (Variable, Trit)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_assigned())
            .map(|(v, t)| (v, *t))
    }

    /// Number of variables occurring in the clause.
    #[must_use]
    pub fn width(&self) -> usize {
        self.literals().count()
    }

    /// True when some occurring variable carries the clause's polarity in `assignment`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals().any(|(v, t)| assignment[v] == t)
    }

    /// The clause as signed DIMACS literals in ascending variable order.
    #[must_use]
    pub fn to_dimacs(&self) -> Vec<i32> {
        self.literals()
            .filter_map(|(v, t)| t.to_literal(v))
            .collect()
    }
}

impl Index<Variable> for Clause {
    type Output = Trit;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index]
    }
}
