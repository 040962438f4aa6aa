//! Restart strategies.
//!
//! A restart throws away the whole search state of the current epoch and
//! starts again with a freshly shuffled propagation order. Strategies only
//! decide *when*: they count backtracks since the last restart and compare the
//! count to a cutoff that may grow from one restart to the next.
//!
//! - `Geometric`: the cutoff is multiplied by `N` after every restart. With
//!   the default factor of 2 and an initial cutoff of 4 the cutoffs run
//!   4, 8, 16, 32, ...
//! - `Never`: restarts are disabled.

use std::fmt::Debug;

/// Default number of backtracks before the first restart.
pub const DEFAULT_CUTOFF: usize = 4;

/// A restart schedule driven by the backtrack count.
pub trait Restarter: Debug + Clone {
    /// A fresh strategy whose first restart fires after `initial_cutoff` backtracks.
    fn new(initial_cutoff: usize) -> Self;

    /// Backtracks since the last restart.
    fn backtracks(&self) -> usize;

    /// Backtracks required before the next restart.
    fn cutoff(&self) -> usize;

    /// Counts one backtrack.
    fn on_backtrack(&mut self);

    /// Resets the backtrack count and moves the cutoff on.
    fn restart(&mut self);

    /// Restarts performed so far.
    fn num_restarts(&self) -> usize;

    /// The cutoff has been reached.
    fn should_restart(&self) -> bool {
        self.backtracks() >= self.cutoff()
    }
}

/// Cutoff multiplied by `N` after each restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometric<const N: usize = 2> {
    restarts: usize,
    backtracks: usize,
    cutoff: usize,
}

impl<const N: usize> Default for Geometric<N> {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

impl<const N: usize> Restarter for Geometric<N> {
    fn new(initial_cutoff: usize) -> Self {
        Self {
            restarts: 0,
            backtracks: 0,
            cutoff: initial_cutoff,
        }
    }

    fn backtracks(&self) -> usize {
        self.backtracks
    }

    fn cutoff(&self) -> usize {
        self.cutoff
    }

    fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.wrapping_add(1);
    }

    fn restart(&mut self) {
        self.restarts = self.restarts.wrapping_add(1);
        self.backtracks = 0;
        // A zero cutoff would restart on every iteration.
        self.cutoff = self.cutoff.saturating_mul(N).max(1);
    }

    fn num_restarts(&self) -> usize {
        self.restarts
    }
}

/// Never restarts. Backtracks are still counted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Never {
    backtracks: usize,
}

impl Restarter for Never {
    fn new(_: usize) -> Self {
        Self::default()
    }

    fn backtracks(&self) -> usize {
        self.backtracks
    }

    fn cutoff(&self) -> usize {
        usize::MAX
    }

    fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.wrapping_add(1);
    }

    fn restart(&mut self) {}

    fn num_restarts(&self) -> usize {
        0
    }

    fn should_restart(&self) -> bool {
        false
    }
}
