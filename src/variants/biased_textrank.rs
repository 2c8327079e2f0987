//! BiasedTextRank variant
//!
//! BiasedTextRank steers the ranking towards a set of focus terms: the
//! teleport weight of a node whose lemma matches a focus term is
//! `focus_bias`, every other node keeps weight 1.0.

use crate::config::TextRankConfig;
use crate::errors::Result;
use crate::pipeline::artifacts::ExtractionResult;
use crate::pipeline::observer::NoopObserver;
use crate::pipeline::runner::BiasedTextRankPipeline;
use crate::types::{Document, Phrase};

/// BiasedTextRank implementation
#[derive(Debug)]
pub struct BiasedTextRank {
    config: TextRankConfig,
}

impl BiasedTextRank {
    /// Create an extractor focused on the given terms
    pub fn new<I, S>(focus_terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(TextRankConfig::default().with_focus_terms(focus_terms))
    }

    /// Create with custom config; focus terms and bias come from the config
    pub fn with_config(config: TextRankConfig) -> Self {
        Self { config }
    }

    /// Set the teleport weight of focus nodes
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.config.focus_bias = bias;
        self
    }

    /// Extract keyphrases using BiasedTextRank
    pub fn extract(&self, doc: &Document) -> Result<Vec<Phrase>> {
        Ok(self.extract_with_info(doc)?.phrases)
    }

    /// Extract keyphrases with PageRank convergence information
    pub fn extract_with_info(&self, doc: &Document) -> Result<ExtractionResult> {
        BiasedTextRankPipeline::biased_textrank().run(doc, &self.config, &mut NoopObserver)
    }
}

/// Convenience function to extract keyphrases biased towards `focus_terms`
pub fn extract_keyphrases_biased(
    doc: &Document,
    focus_terms: &[&str],
    config: &TextRankConfig,
) -> Result<Vec<Phrase>> {
    let config = config.clone().with_focus_terms(focus_terms.iter().copied());
    BiasedTextRank::with_config(config).extract(doc)
}
