//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) node and edge lookups during construction.

use crate::config::TextRankConfig;
use crate::nlp::filter::TokenFilter;
use crate::types::{Document, NodeKey, Token};
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The `(lemma, pos)` key of this node
    pub key: NodeKey,
    /// Number of eligible token occurrences mapped to this node
    pub frequency: usize,
    /// Sum of the document positions of those occurrences
    pub position_sum: usize,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(key: NodeKey) -> Self {
        Self {
            key,
            frequency: 0,
            position_sum: 0,
            edges: FxHashMap::default(),
        }
    }

    /// Mean document position of this node's occurrences
    pub fn mean_position(&self) -> f64 {
        if self.frequency == 0 {
            return 0.0;
        }
        self.position_sum as f64 / self.frequency as f64
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps node key -> node ID
    key_to_id: FxHashMap<NodeKey, u32>,
    /// Node storage, in order of first appearance
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            key_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            key_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given key, returning its ID
    pub fn get_or_create_node(&mut self, key: &NodeKey) -> u32 {
        if let Some(&id) = self.key_to_id.get(key) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.key_to_id.insert(key.clone(), id);
        self.nodes.push(BuilderNode::new(key.clone()));
        id
    }

    /// Record one occurrence of a token, returning its node ID
    pub fn add_occurrence(&mut self, token: &Token) -> u32 {
        let id = self.get_or_create_node(&token.node_key());
        let node = &mut self.nodes[id as usize];
        node.frequency += 1;
        node.position_sum += token.position;
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build the co-occurrence graph of a document.
    ///
    /// Windows never cross a sentence boundary. Two eligible tokens are
    /// linked when their distance is below `window_size`; the distance is
    /// measured in original token positions, or in eligible-token steps when
    /// `window_over_filtered_stream` is set.
    pub fn from_document(doc: &Document, filter: &TokenFilter, cfg: &TextRankConfig) -> Self {
        let mut builder = Self::with_capacity(doc.num_tokens() / 2);
        let window = cfg.window_size;

        let mut eligible: Vec<(u32, usize)> = Vec::new();
        for sentence in &doc.sentences {
            eligible.clear();
            for token in sentence.tokens.iter().filter(|t| filter.is_eligible(t)) {
                let id = builder.add_occurrence(token);
                eligible.push((id, token.position));
            }

            for j in 0..eligible.len() {
                let (node_j, pos_j) = eligible[j];
                for (step, &(node_k, pos_k)) in eligible[j + 1..].iter().enumerate() {
                    let distance = if cfg.window_over_filtered_stream {
                        step + 1
                    } else {
                        // Out-of-order positions are malformed; never link them
                        match pos_k.checked_sub(pos_j) {
                            Some(d) => d,
                            None => continue,
                        }
                    };
                    if distance >= window {
                        break;
                    }
                    builder.increment_edge(node_j, node_k, 1.0);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by key
    pub fn get_node_id(&self, key: &NodeKey) -> Option<u32> {
        self.key_to_id.get(key).copied()
    }

    /// Weight of the edge between two nodes, 0.0 if absent
    pub fn edge_weight(&self, a: u32, b: u32) -> f64 {
        self.get_node(a)
            .and_then(|n| n.edges.get(&b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
