//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds the statically-composed teleport stage.
//! Calling [`Pipeline::run`] executes every stage in order, threading
//! artifacts between them and notifying a [`PipelineObserver`] at each
//! boundary:
//!
//! 1. Validate configuration and document
//! 2. Build the co-occurrence graph
//! 3. Build the teleport vector
//! 4. Rank (PageRank or personalized PageRank)
//! 5. Aggregate phrases
//! 6. Summarize (only when `cfg.summarize` is set)
//!
//! Each stage needs the complete output of the previous one.

use crate::config::TextRankConfig;
use crate::errors::Result;
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::nlp::filter::TokenFilter;
use crate::pagerank::personalized::PersonalizedPageRank;
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::extraction::PhraseExtractor;
use crate::pipeline::artifacts::{ExtractionResult, NodeRanks};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_GRAPH,
    STAGE_PHRASES, STAGE_RANK, STAGE_SUMMARY, STAGE_TELEPORT, STAGE_VALIDATE,
};
use crate::pipeline::traits::{
    ConfiguredTeleportBuilder, FocusTermsTeleportBuilder, PositionTeleportBuilder,
    TeleportBuilder, UniformTeleportBuilder,
};
use crate::summarizer::selector::SentenceSelector;
use crate::types::Document;
use rayon::prelude::*;

/// Enter a tracing span for a pipeline stage; it closes at the end of the
/// enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline
// ============================================================================

/// A pipeline parameterized by its teleport stage.
///
/// | Alias | Teleport |
/// |-------|----------|
/// | [`Pipeline`] (default) | [`ConfiguredTeleportBuilder`] |
/// | [`TextRankPipeline`] | [`UniformTeleportBuilder`] |
/// | [`PositionRankPipeline`] | [`PositionTeleportBuilder`] |
/// | [`BiasedTextRankPipeline`] | [`FocusTermsTeleportBuilder`] |
#[derive(Debug, Clone, Default)]
pub struct Pipeline<TB = ConfiguredTeleportBuilder> {
    pub teleport_builder: TB,
}

pub type TextRankPipeline = Pipeline<UniformTeleportBuilder>;
pub type PositionRankPipeline = Pipeline<PositionTeleportBuilder>;
pub type BiasedTextRankPipeline = Pipeline<FocusTermsTeleportBuilder>;

impl Pipeline {
    /// Pipeline whose teleport follows `position_bias` / `focus_terms`
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextRankPipeline {
    /// Standard TextRank: uniform teleport regardless of configuration
    pub fn base_textrank() -> Self {
        Pipeline::with_teleport(UniformTeleportBuilder)
    }
}

impl PositionRankPipeline {
    /// PositionRank: teleport biased towards early nodes
    pub fn position_rank() -> Self {
        Pipeline::with_teleport(PositionTeleportBuilder)
    }
}

impl BiasedTextRankPipeline {
    /// BiasedTextRank: teleport biased towards `cfg.focus_terms`
    pub fn biased_textrank() -> Self {
        Pipeline::with_teleport(FocusTermsTeleportBuilder)
    }
}

impl<TB: TeleportBuilder> Pipeline<TB> {
    /// Build a pipeline around a custom teleport stage
    pub fn with_teleport(teleport_builder: TB) -> Self {
        Self { teleport_builder }
    }

    /// Execute the pipeline on one document.
    ///
    /// Fails only on an invalid configuration or a malformed document;
    /// empty inputs produce an empty result and non-convergence is
    /// reported through `converged` / `iterations`.
    pub fn run(
        &self,
        doc: &Document,
        cfg: &TextRankConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<ExtractionResult> {
        // Stage 0: Validate
        {
            trace_stage!(STAGE_VALIDATE);
            observer.on_stage_start(STAGE_VALIDATE);
            let clock = StageClock::start();
            cfg.validate()?;
            doc.validate()?;
            observer.on_stage_end(STAGE_VALIDATE, &StageReport::new(clock.elapsed()));
        }

        let filter = TokenFilter::from_config(cfg);

        // Stage 1: Build graph
        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let builder = GraphBuilder::from_document(doc, &filter, cfg);
            let graph = CsrGraph::from_builder(&builder);
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.num_nodes)
                .edges(graph.num_edges())
                .build();
            tracing::debug!(
                nodes = graph.num_nodes,
                edges = graph.num_edges(),
                isolated = graph.isolated_nodes().len(),
                "graph built"
            );
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(&graph);
            graph
        };

        // Stage 2: Build teleport vector
        let teleport = {
            trace_stage!(STAGE_TELEPORT);
            observer.on_stage_start(STAGE_TELEPORT);
            let clock = StageClock::start();
            let teleport = self.teleport_builder.build(&graph, cfg);
            observer.on_stage_end(STAGE_TELEPORT, &StageReport::new(clock.elapsed()));
            teleport
        };

        // Stage 3: Rank
        let ranks = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let result = match teleport {
                Some(personalization) => PersonalizedPageRank::from_config(cfg)
                    .with_personalization(personalization)
                    .run(&graph),
                None => StandardPageRank::from_config(cfg).run(&graph),
            };
            let ranks = NodeRanks::new(&graph, &result);
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(ranks.iterations())
                .converged(ranks.converged())
                .residual(ranks.delta())
                .build();
            tracing::debug!(
                iterations = ranks.iterations(),
                converged = ranks.converged(),
                delta = ranks.delta(),
                "ranking finished"
            );
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_rank(&ranks);
            ranks
        };

        // Stage 4: Aggregate phrases
        let phrases = {
            trace_stage!(STAGE_PHRASES);
            observer.on_stage_start(STAGE_PHRASES);
            let clock = StageClock::start();
            let phrases = PhraseExtractor::from_config(cfg).extract(doc, &ranks, &filter);
            observer.on_stage_end(STAGE_PHRASES, &StageReport::new(clock.elapsed()));
            observer.on_phrases(&phrases);
            phrases
        };

        // Stage 5: Summarize
        let summary = if cfg.summarize {
            trace_stage!(STAGE_SUMMARY);
            observer.on_stage_start(STAGE_SUMMARY);
            let clock = StageClock::start();
            let summary = SentenceSelector::from_config(cfg).select(doc, &phrases);
            observer.on_stage_end(STAGE_SUMMARY, &StageReport::new(clock.elapsed()));
            observer.on_summary(&summary);
            summary
        } else {
            Vec::new()
        };

        Ok(ExtractionResult {
            phrases,
            summary,
            iterations: ranks.iterations(),
            converged: ranks.converged(),
            delta: ranks.delta(),
            node_count: graph.num_nodes,
            edge_count: graph.num_edges(),
        })
    }
}

impl<TB: TeleportBuilder + Sync> Pipeline<TB> {
    /// Run independent documents in parallel, one result per document in
    /// input order.
    pub fn run_batch(&self, docs: &[Document], cfg: &TextRankConfig) -> Vec<Result<ExtractionResult>> {
        docs.par_iter()
            .map(|doc| self.run(doc, cfg, &mut NoopObserver))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummaryLimit;
    use crate::errors::TextRankError;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::types::{Phrase, PosTag, SummarySentence, Token};

    fn sample_doc() -> Document {
        // "Rust is a systems programming language. Systems programming needs control."
        Document::from_tokens(vec![
            Token::new("Rust", "rust", PosTag::ProperNoun, 0, 0),
            Token::new("is", "be", PosTag::Auxiliary, 0, 1).stopword(),
            Token::new("a", "a", PosTag::Determiner, 0, 2).stopword(),
            Token::new("systems", "system", PosTag::Noun, 0, 3),
            Token::new("programming", "programming", PosTag::Noun, 0, 4),
            Token::new("language", "language", PosTag::Noun, 0, 5).without_space(),
            Token::new(".", ".", PosTag::Punctuation, 0, 6),
            Token::new("Systems", "system", PosTag::Noun, 1, 7),
            Token::new("programming", "programming", PosTag::Noun, 1, 8),
            Token::new("needs", "need", PosTag::Verb, 1, 9),
            Token::new("control", "control", PosTag::Noun, 1, 10).without_space(),
            Token::new(".", ".", PosTag::Punctuation, 1, 11),
        ])
    }

    #[test]
    fn test_pipeline_constructs() {
        let _configured = Pipeline::new();
        let _base = TextRankPipeline::base_textrank();
        let _position = PositionRankPipeline::position_rank();
        let _biased = BiasedTextRankPipeline::biased_textrank();
    }

    #[test]
    fn test_pipeline_run_produces_phrases() {
        let result = Pipeline::new()
            .run(&sample_doc(), &TextRankConfig::default(), &mut NoopObserver)
            .unwrap();

        assert!(result.converged);
        assert!(result.iterations > 0);
        assert_eq!(result.node_count, 5);
        assert!(!result.phrases.is_empty());
        assert!(result.summary.is_empty());

        // "programming" and "system" are the best-connected nodes
        let top = &result.phrases[0];
        assert_eq!(top.lemma, "system programming");
        assert_eq!(top.text, "Systems programming");
    }

    #[test]
    fn test_pipeline_run_with_timing_observer() {
        let cfg = TextRankConfig::default().with_summarize(true);
        let mut obs = StageTimingObserver::new();

        Pipeline::new().run(&sample_doc(), &cfg, &mut obs).unwrap();

        let stage_names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            stage_names,
            vec![
                STAGE_VALIDATE,
                STAGE_GRAPH,
                STAGE_TELEPORT,
                STAGE_RANK,
                STAGE_PHRASES,
                STAGE_SUMMARY,
            ]
        );
    }

    #[test]
    fn test_summary_stage_skipped_by_default() {
        let mut obs = StageTimingObserver::new();
        Pipeline::new()
            .run(&sample_doc(), &TextRankConfig::default(), &mut obs)
            .unwrap();

        assert_eq!(obs.reports().len(), 5);
        assert!(obs.report(STAGE_SUMMARY).is_none());
    }

    #[test]
    fn test_pipeline_observer_receives_metrics() {
        let mut obs = StageTimingObserver::new();
        Pipeline::new()
            .run(&sample_doc(), &TextRankConfig::default(), &mut obs)
            .unwrap();

        let graph_report = obs.report(STAGE_GRAPH).unwrap();
        assert_eq!(graph_report.nodes(), Some(5));
        assert!(graph_report.edges().is_some());

        let rank_report = obs.report(STAGE_RANK).unwrap();
        assert!(rank_report.iterations().is_some());
        assert_eq!(rank_report.converged(), Some(true));
        assert!(rank_report.residual().is_some());
    }

    #[test]
    fn test_pipeline_calls_all_artifact_observers() {
        let cfg = TextRankConfig::default().with_summarize(true);
        let mut obs = ArtifactObserver::default();

        Pipeline::new().run(&sample_doc(), &cfg, &mut obs).unwrap();

        assert!(obs.saw_graph, "on_graph not called");
        assert!(obs.saw_rank, "on_rank not called");
        assert!(obs.saw_phrases, "on_phrases not called");
        assert!(obs.saw_summary, "on_summary not called");
    }

    #[test]
    fn test_pipeline_run_empty_input() {
        let cfg = TextRankConfig::default().with_summarize(true);
        let result = Pipeline::new()
            .run(&Document::default(), &cfg, &mut NoopObserver)
            .unwrap();

        assert!(result.phrases.is_empty());
        assert!(result.summary.is_empty());
        assert_eq!(result.node_count, 0);
        assert!(result.converged);
    }

    #[test]
    fn test_invalid_config_fails_before_graph() {
        let cfg = TextRankConfig::default().with_damping(1.5);
        let mut obs = StageTimingObserver::new();

        let err = Pipeline::new().run(&sample_doc(), &cfg, &mut obs).unwrap_err();

        assert!(matches!(err, TextRankError::InvalidConfig { .. }));
        assert!(obs.reports().is_empty());
    }

    #[test]
    fn test_malformed_document_rejected() {
        let doc = Document::from_tokens(vec![
            Token::new("b", "b", PosTag::Noun, 0, 5),
            Token::new("a", "a", PosTag::Noun, 0, 2),
        ]);
        let err = Pipeline::new()
            .run(&doc, &TextRankConfig::default(), &mut NoopObserver)
            .unwrap_err();

        assert!(matches!(err, TextRankError::MalformedInput { .. }));
    }

    #[test]
    fn test_summary_in_document_order() {
        let cfg = TextRankConfig::default()
            .with_summarize(true)
            .with_summary_limit(SummaryLimit::Sentences(5));
        let result = Pipeline::new().run(&sample_doc(), &cfg, &mut NoopObserver).unwrap();

        let indices: Vec<_> = result.summary.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(result.summary[0].text, "Rust is a systems programming language.");
    }

    #[test]
    fn test_position_pipeline_ignores_config_flag() {
        let doc = sample_doc();
        let cfg = TextRankConfig::default();

        let forced = PositionRankPipeline::position_rank()
            .run(&doc, &cfg, &mut NoopObserver)
            .unwrap();
        let configured = Pipeline::new()
            .run(&doc, &cfg.clone().with_position_bias(true), &mut NoopObserver)
            .unwrap();

        assert_eq!(forced.phrases, configured.phrases);
    }

    #[test]
    fn test_run_batch_matches_sequential() {
        let docs = vec![sample_doc(), Document::default(), sample_doc()];
        let cfg = TextRankConfig::default();
        let pipeline = Pipeline::new();

        let batch = pipeline.run_batch(&docs, &cfg);

        assert_eq!(batch.len(), 3);
        for (doc, result) in docs.iter().zip(batch) {
            let sequential = pipeline.run(doc, &cfg, &mut NoopObserver).unwrap();
            assert_eq!(result.unwrap(), sequential);
        }
    }

    /// Observer that records which artifact hooks fired
    #[derive(Default)]
    struct ArtifactObserver {
        saw_graph: bool,
        saw_rank: bool,
        saw_phrases: bool,
        saw_summary: bool,
    }

    impl PipelineObserver for ArtifactObserver {
        fn on_graph(&mut self, _graph: &CsrGraph) {
            self.saw_graph = true;
        }
        fn on_rank(&mut self, _ranks: &NodeRanks) {
            self.saw_rank = true;
        }
        fn on_phrases(&mut self, _phrases: &[Phrase]) {
            self.saw_phrases = true;
        }
        fn on_summary(&mut self, _summary: &[SummarySentence]) {
            self.saw_summary = true;
        }
    }
}
