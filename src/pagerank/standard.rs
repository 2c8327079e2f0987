//! Standard PageRank algorithm
//!
//! Classic weighted PageRank with a uniform teleport term `(1 - d) / N`.

use super::{power_iterate, IterationSettings, PageRankResult, DEFAULT_PARALLEL_THRESHOLD};
use crate::config::TextRankConfig;
use crate::graph::csr::CsrGraph;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold
    pub threshold: f64,
    /// Rescale final scores to sum to 1
    pub normalize: bool,
    /// Node count from which iterations run in parallel
    pub parallel_threshold: usize,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
            normalize: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from the ranking fields of a configuration
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        Self::new()
            .with_damping(cfg.damping)
            .with_max_iterations(cfg.max_iterations)
            .with_threshold(cfg.convergence_epsilon)
            .with_normalize(cfg.normalize_ranks)
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable final normalization
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the node count from which iterations run in parallel
    pub fn with_parallel_threshold(mut self, nodes: usize) -> Self {
        self.parallel_threshold = nodes;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        let teleport = if n == 0 {
            Vec::new()
        } else {
            vec![(1.0 - self.damping) / n as f64; n]
        };
        power_iterate(
            graph,
            &teleport,
            IterationSettings {
                damping: self.damping,
                max_iterations: self.max_iterations,
                threshold: self.threshold,
                normalize: self.normalize,
                parallel_threshold: self.parallel_threshold,
            },
        )
    }
}
