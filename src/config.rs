//! Configuration for phraserank
//!
//! One explicit [`TextRankConfig`] value is threaded through every stage.
//! All fields are optional in JSON and fall back to the documented defaults.

use crate::errors::{Result, TextRankError};
use crate::pipeline::validation::ValidationEngine;
use crate::types::PosTag;
use serde::{Deserialize, Serialize};

// ============================================================================
// Occurrence policy
// ============================================================================

/// How repeated occurrences of one phrase combine into its `rank_score`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrencePolicy {
    /// Keep the score of the first occurrence; later ones only bump the count
    #[default]
    FirstOccurrence,
    /// Highest score over all occurrences
    Max,
    /// Mean score over all occurrences
    Mean,
}

// ============================================================================
// Summary limit & strategy
// ============================================================================

/// Size limit of an extractive summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLimit {
    /// At most this many sentences
    Sentences(usize),
    /// At most this many characters of sentence text
    Characters(usize),
}

impl Default for SummaryLimit {
    fn default() -> Self {
        SummaryLimit::Sentences(3)
    }
}

impl SummaryLimit {
    pub fn is_zero(&self) -> bool {
        matches!(self, SummaryLimit::Sentences(0) | SummaryLimit::Characters(0))
    }
}

/// Sentence scoring strategy for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    /// Greedy residual-score selection with a diversity penalty
    #[default]
    Greedy,
    /// Cosine similarity between sentence and document phrase vectors
    UnitVector,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for graph building, ranking, phrase aggregation and summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Co-occurrence window size (>= 2)
    pub window_size: usize,
    /// Measure window distance over eligible tokens only instead of
    /// original token positions
    pub window_over_filtered_stream: bool,
    /// POS tags eligible for graph nodes and phrase spans
    pub included_pos_tags: Vec<PosTag>,
    /// Drop stopwords from the graph
    pub exclude_stopwords: bool,
    /// Additional lemmas treated as stopwords
    pub stopwords: Vec<String>,
    /// Language code of a built-in stopword list (e.g. "en")
    pub stopword_language: Option<String>,
    /// Damping factor for PageRank, in (0, 1)
    pub damping: f64,
    /// Stop iterating when the L1 score delta falls below this value
    pub convergence_epsilon: f64,
    /// Maximum number of ranking iterations
    pub max_iterations: usize,
    /// Bias teleportation towards nodes appearing early (PositionRank)
    pub position_bias: bool,
    /// Lemmas to bias teleportation towards (BiasedTextRank)
    pub focus_terms: Vec<String>,
    /// Teleport weight of focus terms relative to other nodes
    pub focus_bias: f64,
    /// Rescale ranks to sum to 1
    pub normalize_ranks: bool,
    /// Maximum tokens per phrase span
    pub max_phrase_length: usize,
    /// Drop phrases seen fewer times than this
    pub min_occurrence: usize,
    /// Score policy for repeated phrases
    pub occurrence_policy: OccurrencePolicy,
    /// Number of phrases to return (0 = all)
    pub top_n: usize,
    /// Produce an extractive summary in the pipeline
    pub summarize: bool,
    /// Summary size limit
    pub summary_limit: SummaryLimit,
    /// Residual weight removed from a phrase each time a sentence using it
    /// is selected
    pub diversity_penalty: f64,
    /// Only the top-k phrases feed the summarizer
    pub summary_phrase_limit: Option<usize>,
    /// Sentence scoring strategy
    pub summary_strategy: SummaryStrategy,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            window_size: 3,
            window_over_filtered_stream: false,
            included_pos_tags: vec![PosTag::Adjective, PosTag::Noun, PosTag::ProperNoun],
            exclude_stopwords: true,
            stopwords: Vec::new(),
            stopword_language: None,
            damping: 0.85,
            convergence_epsilon: 1e-6,
            max_iterations: 100,
            position_bias: false,
            focus_terms: Vec::new(),
            focus_bias: 5.0,
            normalize_ranks: true,
            max_phrase_length: 4,
            min_occurrence: 1,
            occurrence_policy: OccurrencePolicy::FirstOccurrence,
            top_n: 0,
            summarize: false,
            summary_limit: SummaryLimit::default(),
            diversity_penalty: 0.5,
            summary_phrase_limit: None,
            summary_strategy: SummaryStrategy::Greedy,
        }
    }
}

impl TextRankConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TextRankError::invalid_config(format!("cannot parse config: {e}")))
    }

    /// Validate the configuration.
    ///
    /// Every error diagnostic is folded into one `InvalidConfig` error;
    /// warnings are logged.
    pub fn validate(&self) -> Result<()> {
        let report = ValidationEngine::with_defaults().validate(self);

        for warning in report.warnings() {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }

        if report.has_errors() {
            let message = report
                .errors()
                .map(|e| format!("{}: {}", e.path, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(TextRankError::invalid_config(message));
        }

        Ok(())
    }

    /// Builder method: set window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Builder method: measure windows over the filtered stream
    pub fn with_window_over_filtered_stream(mut self, filtered: bool) -> Self {
        self.window_over_filtered_stream = filtered;
        self
    }

    /// Builder method: set included POS tags
    pub fn with_included_pos_tags(mut self, tags: Vec<PosTag>) -> Self {
        self.included_pos_tags = tags;
        self
    }

    /// Builder method: toggle stopword exclusion
    pub fn with_exclude_stopwords(mut self, exclude: bool) -> Self {
        self.exclude_stopwords = exclude;
        self
    }

    /// Builder method: add extra stopword lemmas
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Builder method: load a built-in stopword list
    pub fn with_stopword_language(mut self, language: impl Into<String>) -> Self {
        self.stopword_language = Some(language.into());
        self
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set convergence epsilon
    pub fn with_convergence_epsilon(mut self, epsilon: f64) -> Self {
        self.convergence_epsilon = epsilon;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: toggle position bias
    pub fn with_position_bias(mut self, position_bias: bool) -> Self {
        self.position_bias = position_bias;
        self
    }

    /// Builder method: set focus terms
    pub fn with_focus_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set focus bias
    pub fn with_focus_bias(mut self, bias: f64) -> Self {
        self.focus_bias = bias;
        self
    }

    /// Builder method: toggle rank normalization
    pub fn with_normalize_ranks(mut self, normalize: bool) -> Self {
        self.normalize_ranks = normalize;
        self
    }

    /// Builder method: set maximum phrase length
    pub fn with_max_phrase_length(mut self, max_phrase_length: usize) -> Self {
        self.max_phrase_length = max_phrase_length;
        self
    }

    /// Builder method: set minimum occurrence count
    pub fn with_min_occurrence(mut self, min_occurrence: usize) -> Self {
        self.min_occurrence = min_occurrence;
        self
    }

    /// Builder method: set occurrence policy
    pub fn with_occurrence_policy(mut self, policy: OccurrencePolicy) -> Self {
        self.occurrence_policy = policy;
        self
    }

    /// Builder method: set top N phrases to return
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Builder method: toggle summary production
    pub fn with_summarize(mut self, summarize: bool) -> Self {
        self.summarize = summarize;
        self
    }

    /// Builder method: set summary limit
    pub fn with_summary_limit(mut self, limit: SummaryLimit) -> Self {
        self.summary_limit = limit;
        self
    }

    /// Builder method: set diversity penalty
    pub fn with_diversity_penalty(mut self, penalty: f64) -> Self {
        self.diversity_penalty = penalty;
        self
    }

    /// Builder method: limit phrases used for summaries
    pub fn with_summary_phrase_limit(mut self, limit: usize) -> Self {
        self.summary_phrase_limit = Some(limit);
        self
    }

    /// Builder method: set summary strategy
    pub fn with_summary_strategy(mut self, strategy: SummaryStrategy) -> Self {
        self.summary_strategy = strategy;
        self
    }
}
