#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Trit, Variable};
use crate::sat::trail::Trail;
use fastrand::Rng;

/// Chooses the variable to branch on.
pub trait VariableSelection {
    /// The next variable to branch on, if any is left.
    fn pick(&self, assignment: &Assignment, trail: &Trail) -> Option<Variable>;
}

/// Picks the lowest-indexed variable that is unassigned and has not already
/// had both polarities tried this epoch.
///
/// The scan is always in natural order; the shuffled variable order used by
/// propagation does not apply here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn pick(&self, assignment: &Assignment, trail: &Trail) -> Option<Variable> {
        assignment
            .iter()
            .find(|&(v, t)| t.is_unassigned() && !trail.is_visited(v))
            .map(|(v, _)| v)
    }
}

/// A uniformly random polarity for a fresh decision.
pub fn random_polarity(rng: &mut Rng) -> Trit {
    Trit::from_bool(rng.bool())
}
