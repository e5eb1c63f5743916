//! Aggregate statistics over batch records.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::BatchRecord;
use crate::solver::Method;

/// Benchmark size class of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// 2 sources × 3 sinks.
    Small,
    /// 5 sources × 15 sinks.
    Medium,
    /// 10 sources × 50 sinks.
    Large,
    /// Any other instance.
    Unknown,
}

impl SizeClass {
    /// Classifies an instance by the prefix of its name.
    ///
    /// ```
    /// use u_transport::batch::SizeClass;
    ///
    /// assert_eq!(SizeClass::from_instance_name("large_07"), SizeClass::Large);
    /// assert_eq!(SizeClass::from_instance_name("custom"), SizeClass::Unknown);
    /// ```
    pub fn from_instance_name(name: &str) -> Self {
        if name.starts_with("small") {
            SizeClass::Small
        } else if name.starts_with("medium") {
            SizeClass::Medium
        } else if name.starts_with("large") {
            SizeClass::Large
        } else {
            SizeClass::Unknown
        }
    }

    /// `(sources, sinks)` of this class.
    pub fn dimensions(self) -> Option<(usize, usize)> {
        match self {
            SizeClass::Small => Some((2, 3)),
            SizeClass::Medium => Some((5, 15)),
            SizeClass::Large => Some((10, 50)),
            SizeClass::Unknown => None,
        }
    }

    /// Instance name prefix of this class.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            SizeClass::Small => Some("small"),
            SizeClass::Medium => Some("medium"),
            SizeClass::Large => Some("large"),
            SizeClass::Unknown => None,
        }
    }
}

/// Aggregates for one (size class, method) group.
///
/// Means are taken over successful runs and are `None` if every run failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Size class of the group.
    pub size_class: SizeClass,
    /// Method of the group.
    pub method: Method,
    /// Number of records.
    pub runs: usize,
    /// Number of runs ending with a feasible allocation.
    pub solved: usize,
    /// Mean reported cost.
    pub mean_cost: Option<f64>,
    /// Mean number of allocation steps.
    pub mean_iterations: Option<f64>,
    /// Mean solve time.
    pub mean_elapsed: Option<Duration>,
}

/// Per size class and method aggregates of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    rows: Vec<SummaryRow>,
}

#[derive(Default)]
struct Accumulator {
    runs: usize,
    solved: usize,
    succeeded: u32,
    cost: f64,
    iterations: usize,
    elapsed: Duration,
}

impl BatchSummary {
    /// Groups records by size class and method, ordered by class then method.
    pub fn from_records(records: &[BatchRecord]) -> Self {
        let mut groups: BTreeMap<(SizeClass, Method), Accumulator> = BTreeMap::new();
        for record in records {
            let class = SizeClass::from_instance_name(&record.instance_name);
            let acc = groups.entry((class, record.method)).or_default();
            acc.runs += 1;
            if let Ok(result) = &record.outcome {
                acc.succeeded += 1;
                acc.cost += result.cost;
                acc.iterations += result.iterations;
                acc.elapsed += result.elapsed;
                if result.feasible {
                    acc.solved += 1;
                }
            }
        }

        let rows = groups
            .into_iter()
            .map(|((size_class, method), acc)| {
                let n = acc.succeeded;
                SummaryRow {
                    size_class,
                    method,
                    runs: acc.runs,
                    solved: acc.solved,
                    mean_cost: (n > 0).then(|| acc.cost / f64::from(n)),
                    mean_iterations: (n > 0).then(|| acc.iterations as f64 / f64::from(n)),
                    mean_elapsed: (n > 0).then(|| acc.elapsed / n),
                }
            })
            .collect();

        Self { rows }
    }

    /// All groups.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// The group for `size_class` and `method`, if any record fell into it.
    pub fn get(&self, size_class: SizeClass, method: Method) -> Option<&SummaryRow> {
        self.rows
            .iter()
            .find(|row| row.size_class == size_class && row.method == method)
    }
}
