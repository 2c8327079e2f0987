//! Phrase aggregation
//!
//! Turns candidate spans plus node ranks into deduplicated, scored phrases.
//! Each occurrence scores the mean rank of its tokens; tokens that are not
//! graph nodes contribute 0. Occurrences sharing a normalized lemma sequence
//! merge into one [`Phrase`] whose score follows the [`OccurrencePolicy`].

use crate::config::{OccurrencePolicy, TextRankConfig};
use crate::nlp::filter::TokenFilter;
use crate::phrase::chunker::{chunk_lemma, chunk_text, PhraseChunker, PhraseSpan};
use crate::pipeline::artifacts::NodeRanks;
use crate::types::{Document, Phrase};
use rustc_hash::FxHashMap;

/// Running aggregate of one normalized phrase
#[derive(Debug, Clone)]
struct PhraseAccumulator {
    phrase: Phrase,
    first_score: f64,
    max_score: f64,
    score_sum: f64,
}

impl PhraseAccumulator {
    fn new(text: String, lemma: String, score: f64) -> Self {
        Self {
            phrase: Phrase::new(text, lemma, score, 0),
            first_score: score,
            max_score: score,
            score_sum: 0.0,
        }
    }

    fn add(&mut self, score: f64, sentence_idx: usize, offset: (usize, usize)) {
        self.phrase.occurrence_count += 1;
        self.score_sum += score;
        self.max_score = self.max_score.max(score);
        if self.phrase.sentence_indices.last() != Some(&sentence_idx) {
            self.phrase.sentence_indices.push(sentence_idx);
        }
        self.phrase.offsets.push(offset);
    }

    fn finish(mut self, policy: OccurrencePolicy) -> Phrase {
        self.phrase.rank_score = match policy {
            OccurrencePolicy::FirstOccurrence => self.first_score,
            OccurrencePolicy::Max => self.max_score,
            OccurrencePolicy::Mean => self.score_sum / self.phrase.occurrence_count as f64,
        };
        self.phrase
    }
}

/// Builds the ranked phrase list of a document
#[derive(Debug, Clone)]
pub struct PhraseExtractor {
    chunker: PhraseChunker,
    min_occurrence: usize,
    policy: OccurrencePolicy,
    top_n: usize,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self::from_config(&TextRankConfig::default())
    }
}

impl PhraseExtractor {
    /// Create from the phrase fields of a configuration
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        Self {
            chunker: PhraseChunker::new().with_max_length(cfg.max_phrase_length),
            min_occurrence: cfg.min_occurrence,
            policy: cfg.occurrence_policy,
            top_n: cfg.top_n,
        }
    }

    /// Extract, deduplicate, score and sort phrases.
    ///
    /// Output order is [`Phrase::stable_cmp`]; `top_n == 0` keeps everything.
    pub fn extract(&self, doc: &Document, ranks: &NodeRanks, filter: &TokenFilter) -> Vec<Phrase> {
        let spans = self.chunker.extract_chunks(doc, filter);

        // Accumulators in order of first occurrence
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut accumulators: Vec<PhraseAccumulator> = Vec::new();

        for span in &spans {
            // A span with no graph node has nothing to score
            if !span.tokens(doc).iter().any(|t| filter.is_eligible(t)) {
                continue;
            }
            let lemma = chunk_lemma(doc, span);
            if lemma.is_empty() {
                continue;
            }
            let score = span_score(doc, span, ranks, filter);
            let sentence_idx = doc.sentences[span.sentence].index;
            let offset = span_offset(doc, span);

            let slot = match index.get(&lemma) {
                Some(&slot) => slot,
                None => {
                    let text = chunk_text(doc, span);
                    index.insert(lemma.clone(), accumulators.len());
                    accumulators.push(PhraseAccumulator::new(text, lemma, score));
                    accumulators.len() - 1
                }
            };
            accumulators[slot].add(score, sentence_idx, offset);
        }

        let mut phrases: Vec<Phrase> = accumulators
            .into_iter()
            .filter(|acc| acc.phrase.occurrence_count >= self.min_occurrence)
            .map(|acc| acc.finish(self.policy))
            .collect();

        phrases.sort_by(|a, b| a.stable_cmp(b));
        if self.top_n > 0 {
            phrases.truncate(self.top_n);
        }

        tracing::debug!(
            candidates = spans.len(),
            phrases = phrases.len(),
            "phrases aggregated"
        );
        phrases
    }
}

/// Mean node rank over the span; non-node tokens count as 0
fn span_score(doc: &Document, span: &PhraseSpan, ranks: &NodeRanks, filter: &TokenFilter) -> f64 {
    let tokens = span.tokens(doc);
    if tokens.is_empty() {
        return 0.0;
    }
    let sum: f64 = tokens
        .iter()
        .filter(|t| filter.is_eligible(t))
        .map(|t| ranks.get(&t.node_key()).unwrap_or(0.0))
        .sum();
    sum / tokens.len() as f64
}

/// Token position span `(first, last + 1)` of an occurrence
fn span_offset(doc: &Document, span: &PhraseSpan) -> (usize, usize) {
    let tokens = span.tokens(doc);
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first.position, last.position + 1),
        _ => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;
    use crate::pagerank::standard::StandardPageRank;
    use crate::types::{NodeKey, PosTag, Token};

    fn rank(doc: &Document, cfg: &TextRankConfig) -> (NodeRanks, TokenFilter) {
        let filter = TokenFilter::from_config(cfg);
        let graph = CsrGraph::from_builder(&GraphBuilder::from_document(doc, &filter, cfg));
        let result = StandardPageRank::from_config(cfg).run(&graph);
        (NodeRanks::new(&graph, &result), filter)
    }

    fn extract(doc: &Document, cfg: &TextRankConfig) -> Vec<Phrase> {
        let (ranks, filter) = rank(doc, cfg);
        PhraseExtractor::from_config(cfg).extract(doc, &ranks, &filter)
    }

    /// "Machine learning helps. Deep learning is machine learning."
    fn ml_doc() -> Document {
        Document::from_tokens(vec![
            Token::new("Machine", "machine", PosTag::Noun, 0, 0),
            Token::new("learning", "learning", PosTag::Noun, 0, 1),
            Token::new("helps", "help", PosTag::Verb, 0, 2),
            Token::new("Deep", "deep", PosTag::Adjective, 1, 3),
            Token::new("learning", "learning", PosTag::Noun, 1, 4),
            Token::new("is", "be", PosTag::Auxiliary, 1, 5),
            Token::new("machine", "machine", PosTag::Noun, 1, 6),
            Token::new("learning", "learning", PosTag::Noun, 1, 7),
        ])
    }

    #[test]
    fn test_occurrences_merge_by_lemma() {
        let phrases = extract(&ml_doc(), &TextRankConfig::default());

        let ml = phrases.iter().find(|p| p.lemma == "machine learning").unwrap();
        assert_eq!(ml.occurrence_count, 2);
        assert_eq!(ml.text, "Machine learning");
        assert_eq!(ml.sentence_indices, vec![0, 1]);
        assert_eq!(ml.offsets, vec![(0, 2), (6, 8)]);
        assert!(ml.occurs_in(1));
        assert_eq!(phrases.len(), 2);
    }

    #[test]
    fn test_score_is_mean_of_token_ranks() {
        let doc = ml_doc();
        let cfg = TextRankConfig::default();
        let (ranks, filter) = rank(&doc, &cfg);
        let phrases = PhraseExtractor::from_config(&cfg).extract(&doc, &ranks, &filter);

        let machine = ranks.get(&NodeKey::new("machine", PosTag::Noun)).unwrap();
        let learning = ranks.get(&NodeKey::new("learning", PosTag::Noun)).unwrap();
        let ml = phrases.iter().find(|p| p.lemma == "machine learning").unwrap();
        assert!((ml.rank_score - (machine + learning) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_node_tokens_count_zero() {
        // "data" is a stopword noun: part of the run, but not a graph node
        let doc = Document::from_tokens(vec![
            Token::new("graph", "graph", PosTag::Noun, 0, 0),
            Token::new("data", "data", PosTag::Noun, 0, 1).stopword(),
        ]);
        let cfg = TextRankConfig::default();
        let (ranks, filter) = rank(&doc, &cfg);
        let phrases = PhraseExtractor::from_config(&cfg).extract(&doc, &ranks, &filter);

        assert_eq!(phrases.len(), 1);
        let graph_rank = ranks.get(&NodeKey::new("graph", PosTag::Noun)).unwrap();
        assert!((phrases[0].rank_score - graph_rank / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_spans_without_nodes_dropped() {
        // "thing" is a stopword noun standing alone
        let doc = Document::from_tokens(vec![
            Token::new("graph", "graph", PosTag::Noun, 0, 0),
            Token::new("works", "work", PosTag::Verb, 0, 1),
            Token::new("thing", "thing", PosTag::Noun, 0, 2).stopword(),
        ]);
        let phrases = extract(&doc, &TextRankConfig::default());

        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].lemma, "graph");
        assert!(phrases.iter().all(|p| p.rank_score > 0.0));

        // Kept once stopwords are graph nodes again
        let cfg = TextRankConfig::default().with_exclude_stopwords(false);
        assert_eq!(extract(&doc, &cfg).len(), 2);
    }

    #[test]
    fn test_sorted_and_deterministic() {
        let cfg = TextRankConfig::default();
        let first = extract(&ml_doc(), &cfg);
        let second = extract(&ml_doc(), &cfg);

        assert_eq!(first, second);
        for pair in first.windows(2) {
            assert!(pair[0].stable_cmp(&pair[1]).is_le());
        }
    }

    #[test]
    fn test_min_occurrence_and_top_n() {
        let cfg = TextRankConfig::default().with_min_occurrence(2);
        let phrases = extract(&ml_doc(), &cfg);
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].lemma, "machine learning");

        let cfg = TextRankConfig::default().with_top_n(1);
        assert_eq!(extract(&ml_doc(), &cfg).len(), 1);
    }

    #[test]
    fn test_policy_accumulator() {
        let mut acc = PhraseAccumulator::new("a".into(), "a".into(), 0.2);
        acc.add(0.2, 0, (0, 1));
        acc.add(0.6, 0, (3, 4));
        acc.add(0.4, 2, (9, 10));

        let first = acc.clone().finish(OccurrencePolicy::FirstOccurrence);
        let max = acc.clone().finish(OccurrencePolicy::Max);
        let mean = acc.finish(OccurrencePolicy::Mean);

        assert!((first.rank_score - 0.2).abs() < 1e-12);
        assert!((max.rank_score - 0.6).abs() < 1e-12);
        assert!((mean.rank_score - 0.4).abs() < 1e-12);
        assert_eq!(mean.occurrence_count, 3);
        assert_eq!(mean.sentence_indices, vec![0, 2]);
    }

    #[test]
    fn test_empty_document() {
        let phrases = extract(&Document::default(), &TextRankConfig::default());
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_isolated_single_token_phrase() {
        let doc = Document::from_tokens(vec![Token::new("Rust", "rust", PosTag::ProperNoun, 0, 0)]);
        let phrases = extract(&doc, &TextRankConfig::default());

        assert_eq!(phrases.len(), 1);
        assert!((phrases[0].rank_score - 1.0).abs() < 1e-12);
    }
}
