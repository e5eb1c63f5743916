//! Instance × method batch driver.

use std::time::Duration;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use super::BatchConfig;
use crate::error::SolveError;
use crate::models::{Instance, SolverResult};
use crate::solver::Method;

/// Failure of one instance within a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// The solver rejected the instance or got stuck.
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// The solve finished but exceeded the configured budget.
    #[error("timed out after {elapsed:?} (budget {budget:?})")]
    TimedOut {
        /// Time the solve took.
        elapsed: Duration,
        /// Configured budget.
        budget: Duration,
    },
}

/// Outcome of one method on one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    /// Name of the instance.
    pub instance_name: String,
    /// Method that was run.
    pub method: Method,
    /// Result summary, or why the run failed.
    pub outcome: Result<SolverResult, BatchError>,
}

impl BatchRecord {
    /// Returns `true` if the run succeeded with a feasible allocation.
    pub fn is_solved(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.feasible)
    }
}

/// Runs every configured method on every instance.
///
/// Records come back instance-major, method-minor, in input order, whether
/// or not the batch runs in parallel. A failing instance never affects the
/// others.
///
/// # Examples
///
/// ```
/// use u_transport::batch::{solve_batch, BatchConfig};
/// use u_transport::generator::InstanceGenerator;
///
/// let mut generator = InstanceGenerator::new(1);
/// let instances: Vec<_> = (0..4).map(|k| generator.generate(format!("i{k}"), 3, 5)).collect();
///
/// let records = solve_batch(&instances, &BatchConfig::default().with_parallel(true));
/// assert_eq!(records.len(), 4 * 3);
/// assert!(records.iter().all(|r| r.is_solved()));
/// ```
pub fn solve_batch(instances: &[Instance], config: &BatchConfig) -> Vec<BatchRecord> {
    let jobs: Vec<(&Instance, Method)> = instances
        .iter()
        .flat_map(|instance| config.methods().iter().map(move |&m| (instance, m)))
        .collect();

    info!(
        instances = instances.len(),
        runs = jobs.len(),
        parallel = config.parallel(),
        "starting batch"
    );

    if config.parallel() {
        jobs.par_iter()
            .map(|&(instance, method)| run_one(instance, method, config))
            .collect()
    } else {
        jobs.iter()
            .map(|&(instance, method)| run_one(instance, method, config))
            .collect()
    }
}

fn run_one(instance: &Instance, method: Method, config: &BatchConfig) -> BatchRecord {
    let outcome = match method.solve(instance) {
        Ok((_, result)) => match config.time_budget() {
            Some(budget) if result.elapsed > budget => Err(BatchError::TimedOut {
                elapsed: result.elapsed,
                budget,
            }),
            _ => Ok(result),
        },
        Err(err) => Err(BatchError::from(err)),
    };

    match &outcome {
        Ok(result) => info!(
            instance = instance.name(),
            %method,
            cost = result.cost,
            iterations = result.iterations,
            elapsed = ?result.elapsed,
            feasible = result.feasible,
            "solved instance"
        ),
        Err(err) => warn!(instance = instance.name(), %method, error = %err, "instance failed"),
    }

    BatchRecord {
        instance_name: instance.name().to_string(),
        method,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostMatrix;
    use crate::error::PreconditionError;
    use crate::generator::InstanceGenerator;

    fn instances() -> Vec<Instance> {
        let mut generator = InstanceGenerator::new(21);
        let mut list: Vec<Instance> = (0..3)
            .map(|k| generator.generate(format!("ok_{k}"), 4, 4))
            .collect();
        let cost = CostMatrix::from_data(2, 3, vec![1.0; 6]).expect("valid");
        list.insert(1, Instance::new("bad", vec![5, 5], vec![3, 3, 3], cost));
        list
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let records = solve_batch(&instances(), &BatchConfig::new(vec![Method::Vogel]));
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].instance_name, "bad");
        assert_eq!(
            records[1].outcome,
            Err(BatchError::Solve(SolveError::Precondition(
                PreconditionError::Unbalanced {
                    supply: 10,
                    demand: 9
                }
            )))
        );
        assert!(records[0].is_solved());
        assert!(records[2].is_solved());
        assert!(records[3].is_solved());
    }

    #[test]
    fn test_record_order_instance_major() {
        let records = solve_batch(&instances(), &BatchConfig::default());
        assert_eq!(records.len(), 12);
        assert_eq!(records[0].method, Method::NorthWestCorner);
        assert_eq!(records[1].method, Method::MinimumCost);
        assert_eq!(records[2].method, Method::Vogel);
        assert_eq!(records[3].instance_name, "bad");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let list = instances();
        let seq = solve_batch(&list, &BatchConfig::default());
        let par = solve_batch(&list, &BatchConfig::default().with_parallel(true));
        assert_eq!(seq.len(), par.len());
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.instance_name, b.instance_name);
            assert_eq!(a.method, b.method);
            match (&a.outcome, &b.outcome) {
                (Ok(x), Ok(y)) => {
                    assert_eq!(x.cost.to_bits(), y.cost.to_bits());
                    assert_eq!(x.iterations, y.iterations);
                }
                (Err(x), Err(y)) => assert_eq!(x, y),
                _ => panic!("outcome differs for {}", a.instance_name),
            }
        }
    }

    #[test]
    fn test_zero_budget_times_out() {
        let list = vec![InstanceGenerator::new(2).generate("slow", 10, 50)];
        let config = BatchConfig::new(vec![Method::Vogel]).with_time_budget(Duration::ZERO);
        let records = solve_batch(&list, &config);
        // Any measurable solve exceeds a zero budget.
        match &records[0].outcome {
            Err(BatchError::TimedOut { budget, .. }) => assert_eq!(*budget, Duration::ZERO),
            Ok(result) => assert_eq!(result.elapsed, Duration::ZERO),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
