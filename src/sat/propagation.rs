#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit detection.
//!
//! There are no watched literals here: every call scans the whole clause.
//! The scan follows the caller's variable order, which is reshuffled on every
//! restart and decides which unassigned position is reported when a clause
//! is unit.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Trit, Variable};

/// Literal counts of one clause under an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClauseScan {
    /// Variables occurring in the clause.
    pub num_vars: usize,
    /// Occurring variables assigned against the clause's polarity.
    pub num_false: usize,
    /// Occurring variables assigned with the clause's polarity.
    pub num_true: usize,
    /// Last occurring, unassigned variable met in scan order.
    pub candidate: Option<Variable>,
}

impl ClauseScan {
    /// Scans `clause` under `assignment`, visiting positions in `order`.
    #[must_use]
    pub fn new(clause: &Clause, assignment: &Assignment, order: &[Variable]) -> Self {
        let mut scan = Self::default();

        for &var in order {
            let lit = clause[var];
            if lit.is_unassigned() {
                continue;
            }
            scan.num_vars += 1;

            let value = assignment[var];
            if value.is_unassigned() {
                scan.candidate = Some(var);
            } else if value == lit {
                scan.num_true += 1;
            } else {
                scan.num_false += 1;
            }
        }

        scan
    }

    /// Exactly one occurring variable is not falsified and none is satisfied.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        self.num_true == 0 && self.num_vars.saturating_sub(self.num_false) == 1
    }

    /// The variable a unit clause forces. `None` for non-unit clauses, and for
    /// the degenerate case of a unit count without an unassigned candidate.
    #[must_use]
    pub const fn forced(&self) -> Option<Variable> {
        if self.is_unit() { self.candidate } else { None }
    }
}

/// The variable `clause` forces under `assignment`, scanning in `order`.
#[must_use]
pub fn is_unit(clause: &Clause, assignment: &Assignment, order: &[Variable]) -> Option<Variable> {
    ClauseScan::new(clause, assignment, order).forced()
}

/// A propagation found by [`find_unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Implication {
    /// Index of the unit clause in the formula.
    pub clause: usize,
    /// The forced variable.
    pub variable: Variable,
    /// The clause's own polarity at `variable`, which makes the clause true.
    pub value: Trit,
}

/// The first clause, in formula order, that is unit under `assignment`.
#[must_use]
pub fn find_unit(cnf: &Cnf, assignment: &Assignment, order: &[Variable]) -> Option<Implication> {
    cnf.iter().enumerate().find_map(|(i, clause)| {
        is_unit(clause, assignment, order).map(|var| Implication {
            clause: i,
            variable: var,
            value: clause[var],
        })
    })
}
