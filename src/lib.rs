//! # phraserank
//!
//! Graph-based keyphrase extraction and extractive summarization.
//!
//! This library ranks the words of an annotated document with TextRank and
//! its variants (PositionRank, BiasedTextRank), aggregates word ranks into
//! deduplicated phrases, and optionally selects a diverse set of sentences
//! as an extractive summary.
//!
//! Tokenization, lemmatization and POS tagging are the caller's job: the
//! input is a [`Document`] of sentences of annotated [`Token`]s.
//!
//! ## Features
//!
//! - **Deterministic**: identical input and configuration give identical output
//! - **Parallel**: batches run on rayon; large graphs rank with parallel updates
//! - **Observable**: per-stage `tracing` spans and [`PipelineObserver`] hooks
//!
//! ```
//! use phraserank::{extract_keyphrases, Document, PosTag, TextRankConfig, Token};
//!
//! let doc = Document::from_tokens(vec![
//!     Token::new("Graph", "graph", PosTag::Noun, 0, 0),
//!     Token::new("ranking", "ranking", PosTag::Noun, 0, 1),
//!     Token::new("works", "work", PosTag::Verb, 0, 2),
//! ]);
//! let phrases = extract_keyphrases(&doc, &TextRankConfig::default()).unwrap();
//! assert_eq!(phrases[0].text, "Graph ranking");
//! ```

pub mod config;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod pipeline;
pub mod summarizer;
pub mod types;
pub mod variants;

// Re-export commonly used types
pub use config::{OccurrencePolicy, SummaryLimit, SummaryStrategy, TextRankConfig};
pub use errors::{Result, TextRankError};
pub use types::{Document, NodeKey, Phrase, PosTag, Sentence, SummarySentence, Token};

// Re-export main functionality
pub use graph::{builder::GraphBuilder, csr::CsrGraph};
pub use nlp::{filter::TokenFilter, stopwords::StopwordFilter};
pub use pagerank::{
    personalized::PersonalizedPageRank, standard::StandardPageRank, PageRankResult,
};
pub use phrase::extraction::PhraseExtractor;
pub use pipeline::{
    ExtractionResult, NodeRanks, NoopObserver, Pipeline, PipelineObserver, RankedNode,
    StageTimingObserver, TracingObserver,
};
pub use summarizer::selector::SentenceSelector;
pub use variants::{biased_textrank::BiasedTextRank, position_rank::PositionRank, Variant};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ranked keyphrases of one document
pub fn extract_keyphrases(doc: &Document, cfg: &TextRankConfig) -> Result<Vec<Phrase>> {
    Ok(Pipeline::new().run(doc, cfg, &mut NoopObserver)?.phrases)
}

/// Extractive summary of one document, in document order.
///
/// Runs the full pipeline with summarization enabled regardless of
/// `cfg.summarize`.
pub fn summarize(doc: &Document, cfg: &TextRankConfig) -> Result<Vec<SummarySentence>> {
    let cfg = cfg.clone().with_summarize(true);
    Ok(Pipeline::new().run(doc, &cfg, &mut NoopObserver)?.summary)
}

/// Run independent documents in parallel; one result per document in input order
pub fn extract_batch(docs: &[Document], cfg: &TextRankConfig) -> Vec<Result<ExtractionResult>> {
    Pipeline::new().run_batch(docs, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_tokens(vec![
            Token::new("Fast", "fast", PosTag::Adjective, 0, 0),
            Token::new("parsers", "parser", PosTag::Noun, 0, 1),
            Token::new("matter", "matter", PosTag::Verb, 0, 2),
            Token::new("Parsers", "parser", PosTag::Noun, 1, 3),
            Token::new("need", "need", PosTag::Verb, 1, 4),
            Token::new("tests", "test", PosTag::Noun, 1, 5),
        ])
    }

    #[test]
    fn test_extract_keyphrases() {
        let phrases = extract_keyphrases(&doc(), &TextRankConfig::default()).unwrap();
        // "parser" is the hub of the star graph
        assert_eq!(phrases[0].lemma, "parser");
        assert_eq!(phrases.len(), 3);
    }

    #[test]
    fn test_summarize_forces_summary() {
        let summary = summarize(&doc(), &TextRankConfig::default()).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].text, "Fast parsers matter");
    }

    #[test]
    fn test_extract_batch() {
        let results = extract_batch(&[doc(), Document::default()], &TextRankConfig::default());
        assert_eq!(results.len(), 2);
        assert!(results[1].as_ref().unwrap().phrases.is_empty());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
