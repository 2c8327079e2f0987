//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use crate::graph::csr::CsrGraph;
use crate::pipeline::artifacts::NodeRanks;
use crate::types::{Phrase, SummarySentence};
use std::time::{Duration, Instant};

// ============================================================================
// Stage names
// ============================================================================

pub const STAGE_VALIDATE: &str = "validate";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_TELEPORT: &str = "teleport";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_PHRASES: &str = "phrases";
pub const STAGE_SUMMARY: &str = "summary";

// ============================================================================
// StageReport
// ============================================================================

/// Measurements collected for one stage.
///
/// Every report carries the elapsed time; graph and rank stages add their
/// size and convergence metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    nodes: Option<usize>,
    edges: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
    residual: Option<f64>,
}

impl StageReport {
    /// A report with timing only
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            nodes: None,
            edges: None,
            iterations: None,
            converged: None,
            residual: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn converged(&self) -> Option<bool> {
        self.converged
    }

    /// Final convergence delta of the rank stage
    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Fluent construction of a [`StageReport`] with optional metrics
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    start: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

// ============================================================================
// PipelineObserver
// ============================================================================

/// Callbacks invoked by [`Pipeline::run`](crate::pipeline::runner::Pipeline::run).
///
/// Every method has an empty default, so implementors only override the
/// hooks they care about. Artifact hooks borrow the stage output; nothing
/// is cloned unless the observer does so itself.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_graph(&mut self, _graph: &CsrGraph) {}

    fn on_rank(&mut self, _ranks: &NodeRanks) {}

    fn on_phrases(&mut self, _phrases: &[Phrase]) {}

    fn on_summary(&mut self, _summary: &[SummarySentence]) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage, in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(stage, report)` pairs in completion order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report of the named stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    /// Sum of all stage durations
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Observer that emits one structured `tracing` event per stage boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_start(&mut self, stage: &'static str) {
        tracing::trace!(stage, "stage started");
    }

    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        tracing::debug!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            nodes = report.nodes(),
            edges = report.edges(),
            iterations = report.iterations(),
            converged = report.converged(),
            residual = report.residual(),
            "stage finished"
        );
    }

    fn on_phrases(&mut self, phrases: &[Phrase]) {
        tracing::debug!(count = phrases.len(), "phrases aggregated");
    }

    fn on_summary(&mut self, summary: &[SummarySentence]) {
        tracing::debug!(sentences = summary.len(), "summary selected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(4)
            .edges(5)
            .iterations(12)
            .converged(true)
            .residual(1e-7)
            .build();

        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.nodes(), Some(4));
        assert_eq!(report.edges(), Some(5));
        assert_eq!(report.iterations(), Some(12));
        assert_eq!(report.converged(), Some(true));
        assert_eq!(report.residual(), Some(1e-7));
    }

    #[test]
    fn test_plain_report_has_no_metrics() {
        let report = StageReport::new(Duration::ZERO);
        assert!(report.nodes().is_none());
        assert!(report.converged().is_none());
    }

    #[test]
    fn test_timing_observer_collects_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_micros(10)));
        obs.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_micros(5)));

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_GRAPH, STAGE_RANK]);
        assert_eq!(obs.total_elapsed(), Duration::from_micros(15));
        assert!(obs.report(STAGE_SUMMARY).is_none());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
