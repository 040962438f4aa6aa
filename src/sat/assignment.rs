#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The partial truth assignment and the models extracted from it.

use crate::sat::literal::{Trit, Variable, variable_of};
use core::ops::Index;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Current value of every variable, indexed by variable.
///
/// The number of assigned entries is tracked alongside so that asking whether
/// the assignment is total does not require a scan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<Trit>,
    assigned: usize,
}

impl Index<Variable> for Assignment {
    type Output = Trit;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.values[index]
    }
}

impl Assignment {
    /// All `n` variables unassigned.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            values: vec![Trit::Unassigned; n],
            assigned: 0,
        }
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no variables at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sets `var` to `value`. Setting `Unassigned` is the same as `unassign`.
    pub fn set(&mut self, var: Variable, value: Trit) {
        let old = self.values[var];
        match (old.is_assigned(), value.is_assigned()) {
            (false, true) => self.assigned += 1,
            (true, false) => self.assigned -= 1,
            _ => {}
        }
        self.values[var] = value;
    }

    /// Clears the value of `var`.
    pub fn unassign(&mut self, var: Variable) {
        self.set(var, Trit::Unassigned);
    }

    /// Flips an assigned variable in place, returning the new value.
    pub fn flip(&mut self, var: Variable) -> Trit {
        let value = self.values[var].flipped();
        self.values[var] = value;
        value
    }

    /// Value of `var`, `None` when unassigned.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.values.get(var).and_then(|t| t.to_bool())
    }

    /// Variables currently holding a value.
    #[must_use]
    pub const fn num_assigned(&self) -> usize {
        self.assigned
    }

    /// Every variable has a value.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.assigned == self.values.len()
    }

    /// Some variable still lacks a value.
    #[must_use]
    pub fn has_unassigned(&self) -> bool {
        !self.is_total()
    }

    /// Every variable with its value.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Trit)> + '_ {
        self.values.iter().copied().enumerate()
    }

    /// The assigned variables as a model. Unassigned variables are left out.
    #[must_use]
    pub fn solutions(&self) -> Solutions {
        Solutions(
            self.iter()
                .filter_map(|(v, t)| t.to_literal(v))
                .collect_vec(),
        )
    }
}

/// A model: the assigned variables as signed 1-based DIMACS literals, in
/// ascending variable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Solutions(Vec<i32>);

impl Solutions {
    /// A model from signed DIMACS literals in any order.
    #[must_use]
    pub fn new(literals: Vec<i32>) -> Self {
        Self(literals.into_iter().sorted_by_key(|l| l.unsigned_abs()).collect())
    }

    /// The literals in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.0.iter()
    }

    /// Number of assigned variables in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the model assigns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the zero-based variable `var`, or `None` if the model leaves it open.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.0
            .iter()
            .find(|&&l| variable_of(l) == var)
            .map(|&l| l > 0)
    }

    /// The model as a mapping from zero-based variable to boolean.
    pub fn assignments(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0.iter().map(|&l| (variable_of(l), l > 0))
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}
