#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Decision bookkeeping for one search epoch.
//!
//! The trail keeps the stack of decisions that are still open, the set of
//! decisions whose alternative has already been tried, and for each decision
//! the variables that unit propagation forced while it was the most recent
//! one. The last of these is an arena indexed by variable rather than a map,
//! so entries of popped decisions simply stay where they are until the trail
//! is rebuilt at the next restart.
//!
//! Propagations are credited to the *last decision made*, which is tracked
//! separately from the stack. Popping a decision does not move it: whatever
//! is forced afterwards is appended to the popped decision's list, which is
//! never undone again, so those values hold until the next restart.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;
use bit_vec::BitVec;
use smallvec::SmallVec;

/// Variables forced while one decision was the last one made.
pub type Implied = SmallVec<[Variable; 8]>;

/// Decision stack, visited set and implied lists of the current epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    decisions: Vec<Variable>,
    visited: BitVec,
    implied: Vec<Implied>,
    last_decision: Option<Variable>,
}

impl Trail {
    /// An empty trail over `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            decisions: Vec::with_capacity(num_vars),
            visited: BitVec::from_elem(num_vars, false),
            implied: vec![Implied::new(); num_vars],
            last_decision: None,
        }
    }

    /// Opens a new decision on `var`, starting it with an empty implied list.
    pub fn push_decision(&mut self, var: Variable) {
        self.decisions.push(var);
        self.implied[var].clear();
        self.last_decision = Some(var);
    }

    /// Closes the most recent open decision. The last-decision pointer stays put.
    pub fn pop_decision(&mut self) -> Option<Variable> {
        self.decisions.pop()
    }

    /// The decision that propagations are currently credited to: the last one
    /// pushed this epoch, whether or not it is still on the stack.
    #[must_use]
    pub const fn last_decision(&self) -> Option<Variable> {
        self.last_decision
    }

    /// Records a propagated variable against the last decision, if any.
    pub fn record_implied(&mut self, var: Variable) {
        if let Some(decision) = self.last_decision {
            self.implied[decision].push(var);
        }
    }

    /// Marks `var` as a decision whose alternative has been tried.
    pub fn mark_visited(&mut self, var: Variable) {
        self.visited.set(var, true);
    }

    /// Whether `var` was flipped this epoch.
    #[must_use]
    pub fn is_visited(&self, var: Variable) -> bool {
        self.visited.get(var).unwrap_or(false)
    }

    /// Variables forced while `var` was the last decision.
    #[must_use]
    pub fn implied_by(&self, var: Variable) -> &[Variable] {
        &self.implied[var]
    }

    /// Resets everything forced under `decision` to unassigned.
    ///
    /// The implied list itself is left in place.
    pub fn undo_implied(&self, decision: Variable, assignment: &mut Assignment) {
        for &var in &self.implied[decision] {
            assignment.unassign(var);
        }
    }

    /// Open decisions, oldest first.
    pub fn decisions(&self) -> impl Iterator<Item = &Variable> {
        self.decisions.iter()
    }

    /// Number of open decisions.
    #[must_use]
    pub fn num_open(&self) -> usize {
        self.decisions.len()
    }

    /// Whether the decision stack is non-empty.
    #[must_use]
    pub fn has_open_decisions(&self) -> bool {
        !self.decisions.is_empty()
    }

    /// Number of variables flipped this epoch.
    #[must_use]
    pub fn num_visited(&self) -> usize {
        self.visited.iter().filter(|b| *b).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::Trit;

    #[test]
    fn test_push_pop() {
        let mut trail = Trail::new(4);
        assert_eq!(trail.last_decision(), None);

        trail.push_decision(0);
        trail.push_decision(2);
        assert_eq!(trail.last_decision(), Some(2));
        assert_eq!(trail.num_open(), 2);

        assert_eq!(trail.pop_decision(), Some(2));
        assert_eq!(trail.decisions().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(trail.last_decision(), Some(2));
    }

    #[test]
    fn test_record_after_pop_goes_to_popped_decision() {
        let mut trail = Trail::new(4);
        trail.push_decision(0);
        trail.push_decision(1);
        trail.record_implied(2);
        trail.pop_decision();

        trail.record_implied(3);
        assert!(trail.implied_by(0).is_empty());
        assert_eq!(trail.implied_by(1), &[2, 3]);

        trail.push_decision(3);
        trail.record_implied(2);
        assert_eq!(trail.implied_by(3), &[2]);
    }

    #[test]
    fn test_record_without_decision_is_dropped() {
        let mut trail = Trail::new(3);
        trail.record_implied(1);
        assert!((0..3).all(|v| trail.implied_by(v).is_empty()));
    }

    #[test]
    fn test_record_goes_to_top() {
        let mut trail = Trail::new(4);
        trail.push_decision(0);
        trail.record_implied(1);
        trail.push_decision(2);
        trail.record_implied(3);

        assert_eq!(trail.implied_by(0), &[1]);
        assert_eq!(trail.implied_by(2), &[3]);
    }

    #[test]
    fn test_undo_keeps_list() {
        let mut trail = Trail::new(3);
        let mut a = Assignment::new(3);

        a.set(0, Trit::True);
        trail.push_decision(0);
        a.set(1, Trit::False);
        trail.record_implied(1);
        a.set(2, Trit::True);
        trail.record_implied(2);

        let popped = trail.pop_decision();
        assert_eq!(popped, Some(0));
        trail.undo_implied(0, &mut a);

        assert_eq!(a[0], Trit::True);
        assert!(a[1].is_unassigned());
        assert!(a[2].is_unassigned());
        assert_eq!(trail.implied_by(0), &[1, 2]);
    }

    #[test]
    fn test_visited() {
        let mut trail = Trail::new(3);
        trail.mark_visited(1);
        assert!(trail.is_visited(1));
        assert!(!trail.is_visited(0));
        assert_eq!(trail.num_visited(), 1);
    }
}
