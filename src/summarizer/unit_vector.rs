//! Unit vector representation for sentences
//!
//! Builds sparse vector representations of sentences based on
//! phrase occurrences for similarity calculations.

use crate::types::{Phrase, Sentence};
use rustc_hash::FxHashMap;

/// A sparse unit vector over phrase lemmas
#[derive(Debug, Clone, Default)]
pub struct UnitVector {
    /// Non-zero dimensions: phrase lemma -> weight
    pub dimensions: FxHashMap<String, f64>,
    /// L2 norm before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions
    pub fn from_dimensions(mut dimensions: FxHashMap<String, f64>) -> Self {
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Compute L2 norm
    fn compute_norm(dimensions: &FxHashMap<String, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        // Both sides are normalized, so this is the dot product.
        // Iterate the smaller map.
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .dimensions
            .iter()
            .filter_map(|(key, value)| large.dimensions.get(key).map(|o| value * o))
            .sum()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

/// Build unit vectors for sentences based on phrase occurrences
#[derive(Debug)]
pub struct UnitVectorBuilder<'a> {
    /// Phrases to use for vector dimensions
    phrases: &'a [Phrase],
    /// Whether to weight by phrase score
    weight_by_score: bool,
}

impl<'a> UnitVectorBuilder<'a> {
    /// Create a new builder from extracted phrases
    pub fn new(phrases: &'a [Phrase]) -> Self {
        Self {
            phrases,
            weight_by_score: true,
        }
    }

    /// Set whether to weight dimensions by phrase score
    pub fn with_score_weighting(mut self, weight: bool) -> Self {
        self.weight_by_score = weight;
        self
    }

    fn weight(&self, phrase: &Phrase) -> f64 {
        if self.weight_by_score {
            phrase.rank_score
        } else {
            1.0
        }
    }

    /// Build a unit vector for a sentence from the phrases occurring in it
    pub fn build_sentence_vector(&self, sentence: &Sentence) -> UnitVector {
        let mut dimensions: FxHashMap<String, f64> = FxHashMap::default();
        for phrase in self.phrases.iter().filter(|p| p.occurs_in(sentence.index)) {
            *dimensions.entry(phrase.lemma.clone()).or_insert(0.0) += self.weight(phrase);
        }
        UnitVector::from_dimensions(dimensions)
    }

    /// Build a document-level unit vector from all phrases
    pub fn build_document_vector(&self) -> UnitVector {
        let dimensions: FxHashMap<String, f64> = self
            .phrases
            .iter()
            .map(|p| (p.lemma.clone(), self.weight(p)))
            .collect();

        UnitVector::from_dimensions(dimensions)
    }
}
