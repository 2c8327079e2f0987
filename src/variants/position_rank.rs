//! PositionRank variant
//!
//! PositionRank biases PageRank towards words that appear earlier in the document.
//! The intuition is that important keywords often appear early (title, introduction).
//!
//! Bias formula: weight = 1 / (mean_position + 1)
//! where mean_position averages every occurrence of the node.
//!
//! Internally this is TextRank + [`PositionTeleportBuilder`]: the only
//! difference from the base algorithm is the teleport (personalization)
//! strategy.
//!
//! [`PositionTeleportBuilder`]: crate::pipeline::traits::PositionTeleportBuilder

use crate::config::TextRankConfig;
use crate::errors::Result;
use crate::pipeline::artifacts::ExtractionResult;
use crate::pipeline::observer::NoopObserver;
use crate::pipeline::runner::PositionRankPipeline;
use crate::types::{Document, Phrase};

/// PositionRank implementation
#[derive(Debug)]
pub struct PositionRank {
    config: TextRankConfig,
}

impl Default for PositionRank {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionRank {
    /// Create a new PositionRank extractor with default config
    pub fn new() -> Self {
        Self::with_config(TextRankConfig::default())
    }

    /// Create with custom config; `position_bias` is forced on
    pub fn with_config(config: TextRankConfig) -> Self {
        Self {
            config: config.with_position_bias(true),
        }
    }

    /// Extract keyphrases using PositionRank
    pub fn extract(&self, doc: &Document) -> Result<Vec<Phrase>> {
        Ok(self.extract_with_info(doc)?.phrases)
    }

    /// Extract keyphrases with PageRank convergence information
    pub fn extract_with_info(&self, doc: &Document) -> Result<ExtractionResult> {
        PositionRankPipeline::position_rank().run(doc, &self.config, &mut NoopObserver)
    }
}

/// Convenience function to extract keyphrases using PositionRank
pub fn extract_keyphrases_position(doc: &Document, config: &TextRankConfig) -> Result<Vec<Phrase>> {
    PositionRank::with_config(config.clone()).extract(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::runner::TextRankPipeline;
    use crate::types::{PosTag, Token};

    fn make_doc() -> Document {
        // "Important topic first. Then details. Important topic again."
        Document::from_tokens(vec![
            Token::new("Important", "important", PosTag::Adjective, 0, 0),
            Token::new("topic", "topic", PosTag::Noun, 0, 1),
            Token::new("first", "first", PosTag::Adverb, 0, 2),
            Token::new("Then", "then", PosTag::Adverb, 1, 3),
            Token::new("details", "detail", PosTag::Noun, 1, 4),
            Token::new("Important", "important", PosTag::Adjective, 2, 5),
            Token::new("topic", "topic", PosTag::Noun, 2, 6),
            Token::new("again", "again", PosTag::Adverb, 2, 7),
        ])
    }

    #[test]
    fn test_position_rank() {
        let phrases = extract_keyphrases_position(&make_doc(), &TextRankConfig::default()).unwrap();

        assert!(!phrases.is_empty());
        assert_eq!(phrases[0].lemma, "important topic");
        assert_eq!(phrases[0].occurrence_count, 2);
    }

    #[test]
    fn test_position_rank_convergence_info() {
        let result = PositionRank::new().extract_with_info(&make_doc()).unwrap();

        assert!(!result.phrases.is_empty());
        assert!(result.converged);
        assert!(result.iterations > 0);
    }

    #[test]
    fn test_empty_input() {
        let phrases =
            extract_keyphrases_position(&Document::default(), &TextRankConfig::default()).unwrap();

        assert!(phrases.is_empty());
    }

    #[test]
    fn test_earlier_words_preferred() {
        // "Early topic is important. Late topic is important."
        let doc = Document::from_tokens(vec![
            Token::new("Early", "early", PosTag::Noun, 0, 0),
            Token::new("topic", "topic", PosTag::Noun, 0, 1),
            Token::new("is", "be", PosTag::Verb, 0, 2),
            Token::new("important", "important", PosTag::Adjective, 0, 3),
            Token::new("Late", "late", PosTag::Noun, 1, 4),
            Token::new("topic", "topic", PosTag::Noun, 1, 5),
            Token::new("is", "be", PosTag::Verb, 1, 6),
            Token::new("important", "important", PosTag::Adjective, 1, 7),
        ]);
        // Split runs so "early" and "late" stand alone
        let cfg = TextRankConfig::default().with_max_phrase_length(1);

        let score = |phrases: &[Phrase], lemma: &str| {
            phrases.iter().find(|p| p.lemma == lemma).map(|p| p.rank_score).unwrap()
        };

        let biased = PositionRank::with_config(cfg.clone()).extract(&doc).unwrap();
        assert!(score(&biased, "early") > score(&biased, "late"));

        // Uniform teleport treats the symmetric nodes identically
        let uniform = TextRankPipeline::base_textrank()
            .run(&doc, &cfg, &mut NoopObserver)
            .unwrap()
            .phrases;
        assert!((score(&uniform, "early") - score(&uniform, "late")).abs() < 1e-12);
    }
}
