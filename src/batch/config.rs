//! Batch driver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::solver::Method;

/// Which methods a batch runs and how.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_transport::batch::BatchConfig;
/// use u_transport::solver::Method;
///
/// let config = BatchConfig::new(vec![Method::Vogel])
///     .with_parallel(true)
///     .with_time_budget(Duration::from_secs(1));
/// assert_eq!(config.methods(), &[Method::Vogel]);
/// assert!(config.parallel());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    methods: Vec<Method>,
    #[serde(default)]
    parallel: bool,
    #[serde(default)]
    time_budget: Option<Duration>,
}

impl BatchConfig {
    /// Runs the given methods sequentially with no time budget.
    pub fn new(methods: Vec<Method>) -> Self {
        Self {
            methods,
            parallel: false,
            time_budget: None,
        }
    }

    /// Enables or disables solving instances on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets a per-instance wall-clock budget.
    ///
    /// A solve that takes longer is recorded as timed out.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Methods run on every instance, in order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Whether instances are solved in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Per-instance wall-clock budget, if any.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(Method::ALL.to_vec())
    }
}
