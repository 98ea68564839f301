//! Per-iteration observation seam.
//!
//! The swarm keeps no history of its own. Callers that want a fitness trace,
//! progress output or metrics attach a [`SearchObserver`] to
//! [`Swarm::run_with_observer`](crate::swarm::Swarm::run_with_observer).

use serde::{Deserialize, Serialize};

/// Summary of one completed iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// 1-based index of the iteration that just completed
    pub iteration: usize,
    /// Global best fitness after the iteration's refresh
    pub global_best_fitness: f64,
    /// Whether the global best moved during this iteration
    pub improved: bool,
}

/// A sink for iteration reports.
pub trait SearchObserver {
    /// Called once after each completed iteration, in iteration order.
    fn on_iteration(&mut self, report: &IterationReport);
}

/// Observer that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_iteration(&mut self, _report: &IterationReport) {}
}

impl<F> SearchObserver for F
where
    F: FnMut(&IterationReport),
{
    fn on_iteration(&mut self, report: &IterationReport) {
        self(report)
    }
}
