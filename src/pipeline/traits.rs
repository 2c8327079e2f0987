//! Stage trait definitions for the pipeline.
//!
//! The teleport stage is the seam between the ranking variants: plain
//! TextRank, PositionRank and BiasedTextRank share every other stage and
//! differ only in the restart distribution handed to PageRank.
//! Implementations are statically dispatched.

use crate::config::TextRankConfig;
use crate::graph::csr::CsrGraph;
use crate::pagerank::personalized::{focus_based_personalization, position_based_personalization};

// ============================================================================
// TeleportBuilder: personalization vector (stage 2)
// ============================================================================

/// Builds the (unnormalized) teleport distribution for PageRank.
///
/// # Contract
///
/// - **Input**: the finished graph and the run configuration.
/// - **Output**: `None` for uniform teleportation (standard PageRank), or
///   one non-negative weight per node ID. The ranker normalizes the
///   weights and scales them by `(1 - damping)`.
pub trait TeleportBuilder {
    fn build(&self, graph: &CsrGraph, cfg: &TextRankConfig) -> Option<Vec<f64>>;
}

/// Uniform teleport: standard TextRank.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformTeleportBuilder;

impl TeleportBuilder for UniformTeleportBuilder {
    #[inline]
    fn build(&self, _graph: &CsrGraph, _cfg: &TextRankConfig) -> Option<Vec<f64>> {
        None
    }
}

/// Position-biased teleport: PositionRank.
///
/// Each node weighs `1 / (mean_position + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTeleportBuilder;

impl TeleportBuilder for PositionTeleportBuilder {
    fn build(&self, graph: &CsrGraph, _cfg: &TextRankConfig) -> Option<Vec<f64>> {
        if graph.is_empty() {
            return None;
        }
        Some(position_based_personalization(&graph.mean_positions))
    }
}

/// Focus-term teleport: BiasedTextRank.
///
/// Nodes whose lemma matches `cfg.focus_terms` weigh `cfg.focus_bias`,
/// all others 1.0. Without focus terms this is uniform.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusTermsTeleportBuilder;

impl TeleportBuilder for FocusTermsTeleportBuilder {
    fn build(&self, graph: &CsrGraph, cfg: &TextRankConfig) -> Option<Vec<f64>> {
        if graph.is_empty() || cfg.focus_terms.is_empty() {
            return None;
        }
        Some(focus_based_personalization(
            &graph.keys,
            &cfg.focus_terms,
            cfg.focus_bias,
        ))
    }
}

/// Chooses the teleport from the configuration.
///
/// `position_bias` wins over `focus_terms`; with neither set the teleport
/// is uniform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredTeleportBuilder;

impl TeleportBuilder for ConfiguredTeleportBuilder {
    fn build(&self, graph: &CsrGraph, cfg: &TextRankConfig) -> Option<Vec<f64>> {
        if cfg.position_bias {
            PositionTeleportBuilder.build(graph, cfg)
        } else if !cfg.focus_terms.is_empty() {
            FocusTermsTeleportBuilder.build(graph, cfg)
        } else {
            UniformTeleportBuilder.build(graph, cfg)
        }
    }
}
