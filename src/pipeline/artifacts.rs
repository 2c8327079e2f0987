//! Pipeline artifacts.
//!
//! Typed intermediate and final results flowing between pipeline stages.
//! Graph and rank artifacts are indexed by node ID; string keys are only
//! materialized at the lookup boundary ([`NodeRanks::get`], [`NodeRanks::ranked`]).

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use crate::types::{NodeKey, Phrase, SummarySentence};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// NodeRanks: ranker output keyed by (lemma, pos)
// ============================================================================

/// A graph node with its final rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub key: NodeKey,
    pub rank: f64,
    /// Number of eligible token occurrences
    pub frequency: usize,
}

/// Final node ranks plus convergence diagnostics.
///
/// Nodes keep the graph's ID order; [`NodeRanks::ranked`] yields the
/// deterministic total order.
#[derive(Debug, Clone, Default)]
pub struct NodeRanks {
    nodes: Vec<RankedNode>,
    index: FxHashMap<NodeKey, u32>,
    iterations: usize,
    converged: bool,
    delta: f64,
}

impl NodeRanks {
    /// Pair every graph node with its PageRank score
    pub fn new(graph: &CsrGraph, result: &PageRankResult) -> Self {
        let nodes: Vec<RankedNode> = graph
            .keys
            .iter()
            .enumerate()
            .map(|(id, key)| RankedNode {
                key: key.clone(),
                rank: result.score(id as u32),
                frequency: graph.frequencies[id],
            })
            .collect();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (node.key.clone(), id as u32))
            .collect();

        Self {
            nodes,
            index,
            iterations: result.iterations,
            converged: result.converged,
            delta: result.delta,
        }
    }

    /// Rank of the node with this key, if it is in the graph
    pub fn get(&self, key: &NodeKey) -> Option<f64> {
        self.index.get(key).map(|&id| self.nodes[id as usize].rank)
    }

    /// Rank of the node with this ID
    pub fn rank_of(&self, id: u32) -> f64 {
        self.nodes.get(id as usize).map_or(0.0, |n| n.rank)
    }

    /// All nodes, rank descending, then frequency descending, then key ascending
    pub fn ranked(&self) -> Vec<RankedNode> {
        let mut ranked = self.nodes.clone();
        ranked.sort_by(|a, b| {
            b.rank
                .total_cmp(&a.rank)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.key.cmp(&b.key))
        });
        ranked
    }

    /// Nodes in graph ID order
    pub fn nodes(&self) -> &[RankedNode] {
        &self.nodes
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// L1 delta of the last iteration
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ============================================================================
// ExtractionResult: public output of one pipeline run
// ============================================================================

/// Public-facing result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Ranked phrases, best first
    pub phrases: Vec<Phrase>,
    /// Selected summary sentences in document order (empty unless requested)
    pub summary: Vec<SummarySentence>,
    /// Ranker iterations performed
    pub iterations: usize,
    /// Whether the ranker met the convergence threshold
    pub converged: bool,
    /// L1 delta of the last ranker iteration
    pub delta: f64,
    /// Graph size
    pub node_count: usize,
    pub edge_count: usize,
}
