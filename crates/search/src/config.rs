//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for UCB1 Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Iterations (select, expand, simulate, backpropagate) per search.
    /// With several workers this budget is split between them.
    pub iterations: u32,

    /// Exploration constant `c` in `w/n + c * sqrt(2 ln N / n)`.
    /// Higher values spread visits more evenly across siblings.
    pub exploration: f64,

    /// Wall-clock budget for one search. When it runs out the loop stops
    /// and the best root child so far is returned. At least one iteration
    /// always runs.
    pub time_limit: Option<Duration>,

    /// Independent trees searched in parallel (root parallelism).
    /// 1 keeps the search on the calling thread.
    pub workers: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 1.4,
            time_limit: None,
            workers: 1,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 64,
            ..Self::default()
        }
    }

    /// Builder pattern: set iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set a per-search deadline.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Builder pattern: set number of root-parallel workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Iteration budget of each root-parallel worker. The budgets sum to
    /// `iterations` (at least 1); the first `iterations % workers` workers
    /// run one extra, and no worker is started without an iteration.
    pub(crate) fn worker_budgets(&self) -> Vec<u32> {
        let total = self.iterations.max(1);
        let workers = (self.workers.max(1) as u32).min(total);
        let base = total / workers;
        let extra = total % workers;
        (0..workers).map(|w| base + u32::from(w < extra)).collect()
    }
}
