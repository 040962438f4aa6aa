//! The solver interface shared by the search engine and its callers.

use crate::sat::assignment::Solutions;
use crate::sat::cnf::Cnf;
use crate::sat::config::Config;
use crate::sat::dpll::Dpll;
use crate::sat::literal::Variable;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Outcome of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A model; variables it leaves out may take either value.
    Sat(Solutions),
    /// No model was found.
    Unsat,
}

impl Verdict {
    /// Whether a model was found.
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    /// The model, if there is one.
    #[must_use]
    pub const fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Sat(s) => Some(s),
            Self::Unsat => None,
        }
    }
}

/// `sat 1 -2 3` or `unsat`.
impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat(s) if s.is_empty() => write!(f, "sat"),
            Self::Sat(s) => write!(f, "sat {s}"),
            Self::Unsat => write!(f, "unsat"),
        }
    }
}

/// Ways a search can end without a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// A decision on the stack had lost its value. The trail is corrupt.
    #[error("corrupted trail: decision variable {} is unassigned", .variable + 1)]
    CorruptedTrail {
        /// The popped decision.
        variable: Variable,
    },

    /// An iteration left the state unchanged, so every later one would too.
    #[error("search stalled: no propagation, decision or backtrack is possible")]
    Stalled,

    /// `Config::max_iterations` ran out before a verdict.
    #[error("iteration budget of {iterations} exhausted")]
    BudgetExhausted {
        /// The configured budget.
        iterations: u64,
    },
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Decisions opened, over all epochs.
    pub decisions: usize,
    /// Variables forced by unit clauses.
    pub propagations: usize,
    /// Decisions flipped.
    pub backtracks: usize,
    /// Restarts performed.
    pub restarts: usize,
    /// Cutoff in force when the search ended.
    pub restart_cutoff: usize,
    /// Iterations of the search loop, restarts included.
    pub iterations: u64,
}

/// A search engine over one formula.
pub trait Solver {
    /// A solver for `cnf` with the default configuration.
    fn new(cnf: Cnf) -> Self
    where
        Self: Sized,
    {
        Self::with_config(cnf, Config::default())
    }

    /// A solver for `cnf` with an explicit configuration.
    fn with_config(cnf: Cnf, config: Config) -> Self
    where
        Self: Sized;

    /// Runs the search to a verdict.
    ///
    /// # Errors
    ///
    /// A [`SolverError`] if the search aborts before reaching a verdict.
    fn solve(&mut self) -> Result<Verdict, SolverError>;

    /// Counters of the search so far.
    fn stats(&self) -> SolutionStats;
}

/// Solves `clauses` over `num_vars` variables with the default configuration.
///
/// Each clause is a list of signed DIMACS literals in `1..=num_vars`; a `0`
/// ends a clause early.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve<C: AsRef<[i32]>>(num_vars: usize, clauses: &[C]) -> Result<Verdict, SolverError> {
    solve_with(num_vars, clauses, Config::default())
}

/// Like [`solve`], with an explicit configuration.
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve_with<C: AsRef<[i32]>>(
    num_vars: usize,
    clauses: &[C],
    config: Config,
) -> Result<Verdict, SolverError> {
    let cnf = Cnf::new(num_vars, clauses);
    let mut solver: Dpll = Dpll::with_config(cnf, config);
    solver.solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Unsat.to_string(), "unsat");
        assert_eq!(
            Verdict::Sat(Solutions::new(vec![-2, 1, 3])).to_string(),
            "sat 1 -2 3"
        );
        assert_eq!(Verdict::Sat(Solutions::default()).to_string(), "sat");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SolverError::CorruptedTrail { variable: 2 }.to_string(),
            "corrupted trail: decision variable 3 is unassigned"
        );
        assert_eq!(
            SolverError::BudgetExhausted { iterations: 10 }.to_string(),
            "iteration budget of 10 exhausted"
        );
    }

    #[test]
    fn test_solve_free_function() {
        let verdict = solve(2, &[vec![1], vec![-2]]).unwrap();
        let model = verdict.solutions().unwrap();
        assert_eq!(model.value(0), Some(true));
        assert_eq!(model.value(1), Some(false));
    }
}
