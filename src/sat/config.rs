//! Search configuration.

use crate::sat::restarter::DEFAULT_CUTOFF;

/// Knobs of a single search. None of them change the algorithm itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Seed for polarity choices and order shuffles. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Backtracks allowed before the first restart.
    pub restart_cutoff: usize,
    /// Abort after this many loop iterations instead of running unbounded.
    pub max_iterations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            restart_cutoff: DEFAULT_CUTOFF,
            max_iterations: None,
        }
    }
}

impl Config {
    /// Fixes the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the backtracks allowed before the first restart.
    #[must_use]
    pub const fn with_restart_cutoff(mut self, cutoff: usize) -> Self {
        self.restart_cutoff = cutoff;
        self
    }

    /// Caps the number of loop iterations.
    #[must_use]
    pub const fn with_max_iterations(mut self, limit: u64) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    pub(crate) fn rng(&self) -> fastrand::Rng {
        self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }
}
