//! Log targets, so individual parts of the search can be filtered with `RUST_LOG`.

/// Target names accepted by `RUST_LOG`, e.g. `RUST_LOG=restart=debug`.
pub mod targets {
    /// The search loop: start, verdict, budget.
    pub const SEARCH: &str = "search";
    /// Unit propagations.
    pub const PROPAGATION: &str = "propagation";
    /// Decisions.
    pub const DECISION: &str = "decision";
    /// Backtracks.
    pub const BACKTRACK: &str = "backtrack";
    /// Restarts.
    pub const RESTART: &str = "restart";
    /// The DIMACS reader.
    pub const DIMACS: &str = "dimacs";
}
