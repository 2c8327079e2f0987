//! Sentence selection for extractive summaries
//!
//! The default strategy is a greedy residual-weight selection: each phrase
//! starts with weight 1.0, a sentence scores `Σ rank_score * residual` over
//! the phrases it contains, and selecting a sentence lowers the residual of
//! its phrases by `diversity_penalty` (clamped at 0). The unit-vector
//! strategy instead ranks sentences by cosine similarity to the document
//! phrase vector. Output is always in document order.

use super::unit_vector::UnitVectorBuilder;
use crate::config::{SummaryLimit, SummaryStrategy, TextRankConfig};
use crate::types::{Document, Phrase, SummarySentence};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Configuration for sentence selection
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Sentence count or character budget
    pub limit: SummaryLimit,
    /// Residual reduction applied to a phrase each time it is covered
    pub diversity_penalty: f64,
    /// Only the top-k phrases feed the summary (`None` = all)
    pub phrase_limit: Option<usize>,
    pub strategy: SummaryStrategy,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::from(&TextRankConfig::default())
    }
}

impl From<&TextRankConfig> for SelectorConfig {
    fn from(cfg: &TextRankConfig) -> Self {
        Self {
            limit: cfg.summary_limit,
            diversity_penalty: cfg.diversity_penalty,
            phrase_limit: cfg.summary_phrase_limit,
            strategy: cfg.summary_strategy,
        }
    }
}

/// Tracks how much of the summary limit is used
#[derive(Debug)]
struct Budget {
    limit: SummaryLimit,
    sentences: usize,
    chars: usize,
}

impl Budget {
    fn new(limit: SummaryLimit) -> Self {
        Self {
            limit,
            sentences: 0,
            chars: 0,
        }
    }

    /// Whether a sentence of `chars` characters still fits
    fn fits(&self, chars: usize) -> bool {
        match self.limit {
            SummaryLimit::Sentences(n) => self.sentences < n,
            SummaryLimit::Characters(n) => self.chars + chars <= n,
        }
    }

    fn take(&mut self, chars: usize) {
        self.sentences += 1;
        self.chars += chars;
    }
}

/// Extractive sentence selector
#[derive(Debug, Default)]
pub struct SentenceSelector {
    config: SelectorConfig,
}

impl SentenceSelector {
    /// Create a new selector with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Create from the summary fields of a configuration
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        Self::with_config(SelectorConfig::from(cfg))
    }

    /// Set the summary limit
    pub fn with_limit(mut self, limit: SummaryLimit) -> Self {
        self.config.limit = limit;
        self
    }

    /// Set the diversity penalty
    pub fn with_diversity_penalty(mut self, penalty: f64) -> Self {
        self.config.diversity_penalty = penalty.max(0.0);
        self
    }

    /// Set the scoring strategy
    pub fn with_strategy(mut self, strategy: SummaryStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Select summary sentences.
    ///
    /// `phrases` must be in ranked order (best first) when a phrase limit
    /// is set. Returns an empty summary when there are no phrases.
    pub fn select(&self, doc: &Document, phrases: &[Phrase]) -> Vec<SummarySentence> {
        let phrases = match self.config.phrase_limit {
            Some(k) => &phrases[..k.min(phrases.len())],
            None => phrases,
        };
        if phrases.is_empty() || doc.sentences.is_empty() {
            return Vec::new();
        }

        let texts: Vec<String> = doc.sentences.iter().map(|s| s.text()).collect();
        let mut selected = match self.config.strategy {
            SummaryStrategy::Greedy => self.select_greedy(doc, phrases, &texts),
            SummaryStrategy::UnitVector => self.select_unit_vector(doc, phrases, &texts),
        };

        // Sort by document order
        selected.sort_by_key(|s| s.index);
        selected
    }

    /// Greedy residual-score selection
    fn select_greedy(
        &self,
        doc: &Document,
        phrases: &[Phrase],
        texts: &[String],
    ) -> Vec<SummarySentence> {
        // Phrases contained in each sentence, by position in `doc.sentences`
        let position: FxHashMap<usize, usize> = doc
            .sentences
            .iter()
            .enumerate()
            .map(|(pos, s)| (s.index, pos))
            .collect();
        let mut contains: Vec<Vec<usize>> = vec![Vec::new(); doc.sentences.len()];
        for (p, phrase) in phrases.iter().enumerate() {
            for idx in &phrase.sentence_indices {
                if let Some(&pos) = position.get(idx) {
                    contains[pos].push(p);
                }
            }
        }

        let mut residual = vec![1.0; phrases.len()];
        let mut taken = vec![false; doc.sentences.len()];
        let mut budget = Budget::new(self.config.limit);
        let mut selected = Vec::new();

        loop {
            // Highest residual score; ties go to the earlier sentence
            let mut best: Option<(usize, f64)> = None;
            for (pos, phrase_ids) in contains.iter().enumerate() {
                if taken[pos] {
                    continue;
                }
                let score: f64 = phrase_ids
                    .iter()
                    .map(|&p| phrases[p].rank_score * residual[p])
                    .sum();
                if best.map_or(true, |(_, b)| score.total_cmp(&b) == Ordering::Greater) {
                    best = Some((pos, score));
                }
            }

            let Some((pos, score)) = best else { break };
            let chars = texts[pos].chars().count();
            if !budget.fits(chars) {
                break;
            }

            budget.take(chars);
            taken[pos] = true;
            for &p in &contains[pos] {
                residual[p] = (residual[p] - self.config.diversity_penalty).max(0.0);
            }
            selected.push(SummarySentence {
                index: doc.sentences[pos].index,
                text: texts[pos].clone(),
                score,
            });
        }

        selected
    }

    /// Cosine similarity to the document phrase vector
    fn select_unit_vector(
        &self,
        doc: &Document,
        phrases: &[Phrase],
        texts: &[String],
    ) -> Vec<SummarySentence> {
        let builder = UnitVectorBuilder::new(phrases);
        let doc_vector = builder.build_document_vector();

        let mut scored: Vec<(usize, f64)> = doc
            .sentences
            .iter()
            .enumerate()
            .map(|(pos, s)| (pos, builder.build_sentence_vector(s).cosine_similarity(&doc_vector)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut budget = Budget::new(self.config.limit);
        let mut selected = Vec::new();
        for (pos, score) in scored {
            let chars = texts[pos].chars().count();
            if !budget.fits(chars) {
                break;
            }
            budget.take(chars);
            selected.push(SummarySentence {
                index: doc.sentences[pos].index,
                text: texts[pos].clone(),
                score,
            });
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PosTag, Sentence, Token};

    fn sentence(index: usize, start: usize, words: &[&str]) -> Sentence {
        let tokens = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, w.to_lowercase(), PosTag::Noun, index, start + i))
            .collect();
        Sentence::new(index, tokens)
    }

    fn phrase(lemma: &str, score: f64, sentences: &[usize]) -> Phrase {
        let mut p = Phrase::new(lemma, lemma, score, sentences.len());
        p.sentence_indices = sentences.to_vec();
        p
    }

    fn make_test_data() -> (Document, Vec<Phrase>) {
        let doc = Document::new(vec![
            sentence(0, 0, &["Machine", "learning", "needs", "AI"]),
            sentence(1, 4, &["Deep", "learning", "uses", "networks"]),
            sentence(2, 8, &["AI", "transforms", "industries"]),
        ]);
        let phrases = vec![
            phrase("machine learning", 0.5, &[0]),
            phrase("ai", 0.4, &[0, 2]),
            phrase("network", 0.3, &[1]),
        ];
        (doc, phrases)
    }

    #[test]
    fn test_greedy_picks_highest_first() {
        let (doc, phrases) = make_test_data();
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Sentences(1))
            .select(&doc, &phrases);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].index, 0);
        assert!((summary[0].score - 0.9).abs() < 1e-12);
        assert_eq!(summary[0].text, "Machine learning needs AI");
    }

    #[test]
    fn test_diversity_penalty_reduces_covered_phrases() {
        let (doc, phrases) = make_test_data();

        // After sentence 0, "ai" keeps 0.5 residual: sentence 2 scores 0.2
        // and loses to sentence 1 (0.3).
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Sentences(2))
            .with_diversity_penalty(0.5)
            .select(&doc, &phrases);
        let indices: Vec<_> = summary.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);

        // Without a penalty sentence 2 (0.4) beats sentence 1 (0.3)
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Sentences(2))
            .with_diversity_penalty(0.0)
            .select(&doc, &phrases);
        let indices: Vec<_> = summary.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_score_reported_at_selection_time() {
        let (doc, phrases) = make_test_data();
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Sentences(3))
            .with_diversity_penalty(0.5)
            .select(&doc, &phrases);

        assert_eq!(summary.len(), 3);
        assert!((summary[2].score - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_document_order() {
        let (doc, phrases) = make_test_data();
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Sentences(3))
            .select(&doc, &phrases);

        for pair in summary.windows(2) {
            assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn test_limit_exceeding_sentences_returns_all() {
        let (doc, phrases) = make_test_data();
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Sentences(10))
            .select(&doc, &phrases);

        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_character_budget() {
        let (doc, phrases) = make_test_data();

        // "Machine learning needs AI" is 25 chars; the next pick does not fit
        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Characters(40))
            .select(&doc, &phrases);
        assert_eq!(summary.len(), 1);

        let summary = SentenceSelector::new()
            .with_limit(SummaryLimit::Characters(10))
            .select(&doc, &phrases);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_phrase_limit() {
        let (doc, phrases) = make_test_data();
        let config = SelectorConfig {
            limit: SummaryLimit::Sentences(1),
            diversity_penalty: 0.5,
            phrase_limit: Some(1),
            strategy: SummaryStrategy::Greedy,
        };
        let summary = SentenceSelector::with_config(config).select(&doc, &phrases);

        assert_eq!(summary.len(), 1);
        assert!((summary[0].score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unit_vector_strategy() {
        let (doc, phrases) = make_test_data();
        let summary = SentenceSelector::new()
            .with_strategy(SummaryStrategy::UnitVector)
            .with_limit(SummaryLimit::Sentences(2))
            .select(&doc, &phrases);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].index, 0);
        assert!(summary.iter().all(|s| s.score > 0.0 && s.score <= 1.0 + 1e-12));
    }

    #[test]
    fn test_empty_phrases() {
        let (doc, _) = make_test_data();
        assert!(SentenceSelector::new().select(&doc, &[]).is_empty());
    }

    #[test]
    fn test_empty_document() {
        let (_, phrases) = make_test_data();
        assert!(SentenceSelector::new().select(&Document::default(), &phrases).is_empty());
    }
}
