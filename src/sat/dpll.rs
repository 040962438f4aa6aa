//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) search engine.
//!
//! `Dpll` runs an iterative DPLL search with unit propagation, chronological
//! backtracking and randomized restarts. Every iteration of the search loop
//! does exactly one of the following, in priority order:
//!
//! 1.  **Restart:** once the restart strategy's backtrack cutoff is reached,
//!     the assignment and trail are thrown away and the propagation scan order
//!     is reshuffled. Nothing learnt survives a restart.
//! 2.  **Backtrack:** if every variable has a value but the formula is still
//!     not satisfied, the most recent open decision is flipped and everything
//!     propagated under it is unassigned again.
//! 3.  **Propagate:** the first unit clause, in formula order, forces its
//!     remaining variable.
//! 4.  **Decide:** the lowest unassigned, unvisited variable gets a random
//!     polarity.
//!
//! After every step other than a restart the formula is checked; a satisfied
//! formula ends the search at once, even with variables still unassigned.
//! The search reports `Unsat` once there is no open decision left and no
//! unassigned variable.
//!
//! # Completeness
//!
//! A flipped decision is not put back on the decision stack and is marked as
//! visited, so its new value stays fixed for the rest of the epoch. Unlike
//! textbook DPLL the engine therefore never backtracks past a flipped decision
//! locally. It can report `Unsat` for a satisfiable formula, or depend on
//! restarts alone to find a model. A `Sat` verdict is always a genuine model.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::config::Config;
use crate::sat::literal::{Trit, Variable};
use crate::sat::log::targets;
use crate::sat::propagation::{Implication, find_unit};
use crate::sat::restarter::{Geometric, Restarter};
use crate::sat::solver::{SolutionStats, Solver, SolverError, Verdict};
use crate::sat::trail::Trail;
use crate::sat::variable_selection::{FixedOrder, VariableSelection, random_polarity};
use fastrand::Rng;

/// What one iteration of the search loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The epoch was thrown away.
    Restarted,
    /// The decision on this variable was flipped and closed.
    Backtracked(Variable),
    /// A unit clause forced a variable.
    Propagated(Implication),
    /// A new decision was opened.
    Decided {
        /// The branching variable.
        variable: Variable,
        /// Its randomly chosen polarity.
        value: Trit,
    },
}

/// A DPLL search over one formula.
///
/// The formula, the propagation order, the restart strategy and the random
/// generator live for the whole search. The assignment and the trail belong
/// to the current epoch and are rebuilt on every restart.
#[derive(Debug, Clone)]
pub struct Dpll<R: Restarter = Geometric> {
    /// The formula. Never modified.
    pub cnf: Cnf,
    /// Values of the current epoch.
    pub assignment: Assignment,
    /// Decisions and implications of the current epoch.
    pub trail: Trail,
    /// Scan order of the propagation oracle; reshuffled on restart.
    pub order: Vec<Variable>,
    /// Branching heuristic.
    pub selector: FixedOrder,
    /// Restart schedule; survives restarts.
    pub restarter: R,
    rng: Rng,
    config: Config,
    stats: SolutionStats,
}

impl<R: Restarter> Solver for Dpll<R> {
    fn with_config(cnf: Cnf, config: Config) -> Self {
        let n = cnf.num_vars;

        Self {
            assignment: Assignment::new(n),
            trail: Trail::new(n),
            order: (0..n).collect(),
            selector: FixedOrder,
            restarter: R::new(config.restart_cutoff),
            rng: config.rng(),
            config,
            stats: SolutionStats::default(),
            cnf,
        }
    }

    fn solve(&mut self) -> Result<Verdict, SolverError> {
        log::debug!(
            target: targets::SEARCH,
            "Solving {} clauses over {} variables",
            self.cnf.len(),
            self.cnf.num_vars
        );

        while self.is_active() {
            if let Some(limit) = self.config.max_iterations {
                if self.stats.iterations >= limit {
                    log::warn!(target: targets::SEARCH, "Iteration budget of {limit} exhausted");
                    return Err(SolverError::BudgetExhausted { iterations: limit });
                }
            }
            self.stats.iterations += 1;

            let step = self.step()?;
            log::trace!(target: targets::SEARCH, "Step {}: {step:?}", self.stats.iterations);

            if step == Step::Restarted {
                continue;
            }

            if self.cnf.is_satisfied(&self.assignment) {
                log::debug!(
                    target: targets::SEARCH,
                    "Satisfied after {} iterations with {} of {} variables assigned",
                    self.stats.iterations,
                    self.assignment.num_assigned(),
                    self.cnf.num_vars
                );
                return Ok(Verdict::Sat(self.assignment.solutions()));
            }
        }

        log::debug!(
            target: targets::SEARCH,
            "Unsatisfiable after {} iterations",
            self.stats.iterations
        );
        Ok(Verdict::Unsat)
    }

    fn stats(&self) -> SolutionStats {
        SolutionStats {
            restarts: self.restarter.num_restarts(),
            restart_cutoff: self.restarter.cutoff(),
            ..self.stats
        }
    }
}

impl<R: Restarter> Dpll<R> {
    /// The search continues while a decision is open or a variable is unassigned.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.trail.has_open_decisions() || self.assignment.has_unassigned()
    }

    /// Performs one iteration of the search loop, without the satisfaction check.
    ///
    /// # Errors
    ///
    /// `CorruptedTrail` if a popped decision had lost its value, `Stalled` if
    /// no step applies.
    pub fn step(&mut self) -> Result<Step, SolverError> {
        if self.restarter.should_restart() {
            self.restart();
            return Ok(Step::Restarted);
        }

        if self.assignment.is_total() {
            return self.backtrack().map(Step::Backtracked);
        }

        if let Some(implication) = self.propagate() {
            return Ok(Step::Propagated(implication));
        }

        if let Some((variable, value)) = self.decide() {
            return Ok(Step::Decided { variable, value });
        }

        Err(SolverError::Stalled)
    }

    /// Discards the epoch and reshuffles the propagation order.
    fn restart(&mut self) {
        self.restarter.restart();
        self.rng.shuffle(&mut self.order);

        let n = self.cnf.num_vars;
        self.assignment = Assignment::new(n);
        self.trail = Trail::new(n);

        log::debug!(
            target: targets::RESTART,
            "Restart {} after {} backtracks, next cutoff {}",
            self.restarter.num_restarts(),
            self.stats.backtracks,
            self.restarter.cutoff()
        );
    }

    /// Flips the most recent open decision and undoes what was forced under it.
    ///
    /// The flipped variable is marked visited and not pushed back, so its value
    /// holds until the next restart.
    fn backtrack(&mut self) -> Result<Variable, SolverError> {
        let var = self.trail.pop_decision().ok_or(SolverError::Stalled)?;

        if self.assignment[var].is_unassigned() {
            log::error!(target: targets::BACKTRACK, "Decision {} popped while unassigned", var + 1);
            return Err(SolverError::CorruptedTrail { variable: var });
        }

        let value = self.assignment.flip(var);
        self.trail.mark_visited(var);
        self.trail.undo_implied(var, &mut self.assignment);

        self.restarter.on_backtrack();
        self.stats.backtracks += 1;

        log::trace!(
            target: targets::BACKTRACK,
            "Flipped {} to {value}, unassigned {} implied",
            var + 1,
            self.trail.implied_by(var).len()
        );
        Ok(var)
    }

    /// Applies the first unit clause, if there is one.
    fn propagate(&mut self) -> Option<Implication> {
        let implication = find_unit(&self.cnf, &self.assignment, &self.order)?;

        self.assignment.set(implication.variable, implication.value);
        self.trail.record_implied(implication.variable);
        self.stats.propagations += 1;

        log::trace!(
            target: targets::PROPAGATION,
            "Clause {} forces {} to {}",
            implication.clause,
            implication.variable + 1,
            implication.value
        );
        Some(implication)
    }

    /// Opens a decision on the next variable with a random polarity.
    fn decide(&mut self) -> Option<(Variable, Trit)> {
        let var = self.selector.pick(&self.assignment, &self.trail)?;
        let value = random_polarity(&mut self.rng);

        self.assignment.set(var, value);
        self.trail.push_decision(var);
        self.stats.decisions += 1;

        log::trace!(target: targets::DECISION, "Decide {} = {value}", var + 1);
        Some((var, value))
    }
}
