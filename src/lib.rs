#![deny(missing_docs)]
//! A DPLL SAT solver with unit propagation, chronological backtracking and
//! randomized restarts.
//!
//! ```
//! use sat_dpll::{solve, Verdict};
//!
//! let verdict = solve(2, &[vec![1, 2], vec![-1, -2]]).unwrap();
//! assert!(verdict.is_sat());
//! assert_eq!(solve(1, &[vec![1], vec![-1]]).unwrap(), Verdict::Unsat);
//! ```
//!
//! The engine never re-opens a decision it has flipped within one restart
//! epoch, so it is not complete: an `Unsat` verdict can be wrong for a
//! satisfiable formula. See [`sat::dpll`] for details.

/// The `sat` module implements the search engine and its DIMACS adapter.
pub mod sat;

pub use sat::assignment::Solutions;
pub use sat::cnf::Cnf;
pub use sat::config::Config;
pub use sat::solver::{SolutionStats, Solver, SolverError, Verdict, solve, solve_with};
