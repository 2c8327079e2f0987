//! PageRank algorithms
//!
//! This module provides standard and personalized PageRank implementations
//! sharing one double-buffered power iteration.

pub mod personalized;
pub mod standard;

use crate::graph::csr::CsrGraph;
use rayon::prelude::*;

/// Graphs with at least this many nodes update scores in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

/// Parameters shared by every power iteration
#[derive(Debug, Clone, Copy)]
pub(crate) struct IterationSettings {
    pub damping: f64,
    pub max_iterations: usize,
    pub threshold: f64,
    pub normalize: bool,
    pub parallel_threshold: usize,
}

/// Run power iteration with a fixed teleport vector.
///
/// `teleport[n]` is the per-iteration restart mass of node `n` and already
/// includes the `(1 - damping)` factor. Each iteration reads the previous
/// score vector and writes a fresh one:
///
/// `new[n] = teleport[n] + d * Σ_{m ∈ N(n)} old[m] * w(m, n) / W(m)`
///
/// Isolated nodes keep only their teleport term.
pub(crate) fn power_iterate(
    graph: &CsrGraph,
    teleport: &[f64],
    settings: IterationSettings,
) -> PageRankResult {
    let n = graph.num_nodes;
    if n == 0 {
        return PageRankResult::new(vec![], 0, 0.0, true);
    }

    let damping = settings.damping;
    let mut scores = vec![1.0 / n as f64; n];
    let mut new_scores = vec![0.0; n];
    let mut iterations = 0;
    let mut delta = f64::MAX;

    let update = |node: usize, old: &[f64]| -> f64 {
        let incoming: f64 = graph
            .neighbors(node as u32)
            .map(|(m, weight)| old[m as usize] * weight / graph.node_total_weight(m))
            .sum();
        teleport[node] + damping * incoming
    };

    while iterations < settings.max_iterations && delta > settings.threshold {
        iterations += 1;

        if n >= settings.parallel_threshold {
            let old = &scores;
            new_scores
                .par_iter_mut()
                .enumerate()
                .for_each(|(node, slot)| *slot = update(node, old));
        } else {
            for (node, slot) in new_scores.iter_mut().enumerate() {
                *slot = update(node, &scores);
            }
        }

        // Convergence delta (L1 norm), summed sequentially for reproducibility
        delta = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        // Swap buffers
        std::mem::swap(&mut scores, &mut new_scores);
    }

    if settings.normalize {
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }
    }

    let converged = delta <= settings.threshold;
    if !converged {
        tracing::warn!(
            iterations,
            delta,
            threshold = settings.threshold,
            "pagerank stopped before convergence"
        );
    }

    PageRankResult::new(scores, iterations, delta, converged)
}
