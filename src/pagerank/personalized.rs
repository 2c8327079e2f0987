//! Personalized PageRank (PPR) algorithm
//!
//! PPR uses a custom teleport distribution instead of uniform teleportation.
//! This allows biasing the ranking towards specific nodes (e.g., for
//! PositionRank or BiasedTextRank).

use super::{power_iterate, IterationSettings, PageRankResult, DEFAULT_PARALLEL_THRESHOLD};
use crate::config::TextRankConfig;
use crate::graph::csr::CsrGraph;
use crate::types::NodeKey;
use rustc_hash::FxHashSet;

/// Personalized PageRank implementation
#[derive(Debug, Clone)]
pub struct PersonalizedPageRank {
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
    /// Personalization vector (bias distribution)
    personalization: Option<Vec<f64>>,
}

impl Default for PersonalizedPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
            normalize: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            personalization: None,
        }
    }
}

impl PersonalizedPageRank {
    /// Create a new PersonalizedPageRank with default settings
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

    /// Set the personalization vector (bias distribution)
    ///
    /// The vector should have one entry per node. It will be normalized internally.
    /// Nodes with higher values will be favored during teleportation.
    pub fn with_personalization(mut self, personalization: Vec<f64>) -> Self {
        self.personalization = Some(personalization);
        self
    }

    /// Set personalization from a sparse representation
    ///
    /// Takes a list of (node_id, weight) pairs and the total number of nodes.
    /// Nodes not in the list get weight 0.
    pub fn with_sparse_personalization(mut self, biases: &[(u32, f64)], num_nodes: usize) -> Self {
        let mut personalization = vec![0.0; num_nodes];
        for &(node, weight) in biases {
            if (node as usize) < num_nodes {
                personalization[node as usize] = weight;
            }
        }
        self.personalization = Some(personalization);
        self
    }

    /// Run Personalized PageRank on a graph
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        let teleport: Vec<f64> = self
            .prepare_personalization(n)
            .into_iter()
            .map(|p| (1.0 - self.damping) * p)
            .collect();

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

    /// Prepare the personalization vector, normalized to sum 1
    fn prepare_personalization(&self, n: usize) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }
        let uniform = || vec![1.0 / n as f64; n];

        let Some(p) = &self.personalization else {
            return uniform();
        };

        // Pad or truncate to the graph size; negative entries carry no mass
        let mut result = vec![0.0; n];
        for (slot, &v) in result.iter_mut().zip(p.iter()) {
            if v.is_finite() && v > 0.0 {
                *slot = v;
            }
        }

        let sum: f64 = result.iter().sum();
        if sum > 0.0 && sum.is_finite() {
            for v in &mut result {
                *v /= sum;
            }
            result
        } else {
            tracing::debug!(nodes = n, "personalization has no mass, using uniform teleport");
            uniform()
        }
    }
}

/// Create a position-based personalization vector
///
/// Assigns weight `1 / (mean_position + 1)` to each node, so nodes that
/// appear early in the document receive more teleport mass.
pub fn position_based_personalization(mean_positions: &[f64]) -> Vec<f64> {
    mean_positions.iter().map(|&pos| 1.0 / (pos + 1.0)).collect()
}

/// Create a focus-based personalization vector for BiasedTextRank
///
/// Assigns `bias_weight` to nodes whose lemma matches a focus term
/// (case-insensitively) and 1.0 to all others.
pub fn focus_based_personalization(
    keys: &[NodeKey],
    focus_terms: &[String],
    bias_weight: f64,
) -> Vec<f64> {
    let focus: FxHashSet<String> = focus_terms.iter().map(|t| t.to_lowercase()).collect();
    keys.iter()
        .map(|key| {
            if focus.contains(&key.lemma.to_lowercase()) {
                bias_weight
            } else {
                1.0
            }
        })
        .collect()
}
