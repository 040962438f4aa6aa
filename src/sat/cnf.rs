#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause database.
//!
//! `Cnf` holds the formula as a list of fixed-width clauses and owns the
//! satisfaction check. It is built once and shared, unchanged, by every epoch
//! of a search.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::clause::Clause;
use crate::sat::literal::Trit;
use core::ops::Index;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A formula in conjunctive normal form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Clauses in input order; propagation scans them in this order.
    pub clauses: Vec<Clause>,
    /// Number of variables, and the width of every clause.
    pub num_vars: usize,
}

impl Cnf {
    /// Encodes `clauses` over `num_vars` variables.
    ///
    /// Each inner list holds signed DIMACS literals; a `0` ends the list early.
    /// Literals are not checked against `num_vars`: callers are expected to
    /// hand over validated input, as the DIMACS parser does.
    pub fn new<I, J>(num_vars: usize, clauses: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: AsRef<[i32]>,
    {
        let clauses = clauses
            .into_iter()
            .map(|c| Clause::new(num_vars, c.as_ref()))
            .collect_vec();

        Self { clauses, num_vars }
    }

    /// The clauses in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True for a formula without clauses, which every assignment satisfies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.iter().map(Clause::width).sum()
    }

    /// Whether `assignment` already satisfies every clause.
    ///
    /// Unassigned variables are allowed; a clause only needs one occurring
    /// variable whose value matches its polarity. An empty formula is
    /// satisfied by anything.
    #[must_use]
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.iter().all(|c| c.is_satisfied_by(assignment))
    }

    /// Re-checks a model against the formula, independently of any solver state.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        let mut assignment = Assignment::new(self.num_vars);
        for (var, value) in solutions.assignments() {
            if var >= self.num_vars {
                return false;
            }
            assignment.set(var, Trit::from_bool(value));
        }
        self.is_satisfied(&assignment)
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

/// Renders the formula in DIMACS format.
impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            let lits = clause.to_dimacs();
            if lits.is_empty() {
                writeln!(f, "0")?;
            } else {
                writeln!(f, "{} 0", lits.iter().join(" "))?;
            }
        }
        Ok(())
    }
}
