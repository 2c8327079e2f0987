//! Core types for phraserank
//!
//! This module defines the annotated document model consumed from an external
//! linguistic front-end, the graph node key, and the phrase / summary outputs.

use crate::errors::{Result, TextRankError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Part of speech
// ============================================================================

/// Part-of-speech tags (Universal POS tag set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Interjection,
    Numeral,
    Particle,
    Punctuation,
    Symbol,
    ProperNoun,
    Auxiliary,
    Other,
}

impl PosTag {
    /// Check if this tag represents a noun (common or proper)
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Parse from a Universal POS tag string (as emitted by spaCy, Stanza, UDPipe)
    pub fn from_universal(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "VERB" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" | "CONJ" => PosTag::Conjunction,
            "INTJ" => PosTag::Interjection,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            "PROPN" => PosTag::ProperNoun,
            "AUX" => PosTag::Auxiliary,
            _ => PosTag::Other,
        }
    }

    /// Get the Universal POS tag string for this enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Preposition => "ADP",
            PosTag::Conjunction => "CCONJ",
            PosTag::Interjection => "INTJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Punctuation => "PUNCT",
            PosTag::Symbol => "SYM",
            PosTag::ProperNoun => "PROPN",
            PosTag::Auxiliary => "AUX",
            PosTag::Other => "X",
        }
    }
}

// ============================================================================
// Token
// ============================================================================

/// A token from the annotated input document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// The lemmatized form (normalized)
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Token position within the whole document
    pub position: usize,
    /// Whether the front-end flagged this token as a stopword
    #[serde(default)]
    pub is_stopword: bool,
    /// Whether a space follows this token in the original text
    #[serde(default = "default_whitespace_after")]
    pub whitespace_after: bool,
}

fn default_whitespace_after() -> bool {
    true
}

impl Token {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PosTag,
        sentence_idx: usize,
        position: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            sentence_idx,
            position,
            is_stopword: false,
            whitespace_after: true,
        }
    }

    /// Builder method: mark the token as a stopword
    pub fn stopword(mut self) -> Self {
        self.is_stopword = true;
        self
    }

    /// Builder method: no whitespace follows this token
    pub fn without_space(mut self) -> Self {
        self.whitespace_after = false;
        self
    }

    /// The graph node key for this token
    pub fn node_key(&self) -> NodeKey {
        NodeKey::new(self.lemma.clone(), self.pos)
    }
}

// ============================================================================
// Sentence & Document
// ============================================================================

/// An ordered run of tokens sharing one sentence index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence index within the document
    pub index: usize,
    /// Tokens in document order
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(index: usize, tokens: Vec<Token>) -> Self {
        Self { index, tokens }
    }

    /// Reconstruct the sentence text from token surface forms
    pub fn text(&self) -> String {
        surface_text(&self.tokens)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Join token surface forms, honoring each token's trailing whitespace flag
pub fn surface_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        out.push_str(&token.text);
        if token.whitespace_after && i + 1 < tokens.len() {
            out.push(' ');
        }
    }
    out
}

/// A fully annotated document: ordered sentences of ordered tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Create a document from sentences
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Group a flat token stream into sentences by `sentence_idx`.
    ///
    /// Tokens are not reordered; a change of `sentence_idx` starts a new
    /// sentence. Run [`Document::validate`] to check the ordering invariants.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut current: Vec<Token> = Vec::new();
        let mut current_idx = None;

        for token in tokens {
            if current_idx != Some(token.sentence_idx) {
                if let Some(idx) = current_idx {
                    sentences.push(Sentence::new(idx, std::mem::take(&mut current)));
                }
                current_idx = Some(token.sentence_idx);
            }
            current.push(token);
        }
        if let Some(idx) = current_idx {
            sentences.push(Sentence::new(idx, current));
        }

        Self { sentences }
    }

    /// Iterate over every token in document order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    /// Total number of tokens
    pub fn num_tokens(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_tokens() == 0
    }

    /// Check the ordering invariants of the document model.
    ///
    /// - token positions strictly increase across the flattened stream
    /// - sentence indices strictly increase across sentences
    /// - every token's `sentence_idx` equals its sentence's index
    pub fn validate(&self) -> Result<()> {
        let mut last_position: Option<usize> = None;
        let mut last_sentence: Option<usize> = None;

        for sentence in &self.sentences {
            if let Some(prev) = last_sentence {
                if sentence.index <= prev {
                    return Err(TextRankError::malformed_input(format!(
                        "sentence index {} follows sentence index {}",
                        sentence.index, prev
                    )));
                }
            }
            last_sentence = Some(sentence.index);

            for token in &sentence.tokens {
                if token.sentence_idx != sentence.index {
                    return Err(TextRankError::malformed_input(format!(
                        "token '{}' at position {} has sentence index {} inside sentence {}",
                        token.text, token.position, token.sentence_idx, sentence.index
                    )));
                }
                if let Some(prev) = last_position {
                    if token.position <= prev {
                        return Err(TextRankError::malformed_input(format!(
                            "token position {} follows position {}",
                            token.position, prev
                        )));
                    }
                }
                last_position = Some(token.position);
            }
        }

        Ok(())
    }
}

// ============================================================================
// Graph node key
// ============================================================================

/// Deduplication key of a graph node: one distinct lexical concept.
///
/// Ordered lexicographically by lemma, then by Universal POS tag string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey {
    pub lemma: String,
    pub pos: PosTag,
}

impl NodeKey {
    pub fn new(lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
        }
    }
}

impl Ord for NodeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lemma
            .cmp(&other.lemma)
            .then_with(|| self.pos.as_str().cmp(other.pos.as_str()))
    }
}

impl PartialOrd for NodeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.lemma, self.pos.as_str())
    }
}

// ============================================================================
// Phrase
// ============================================================================

/// An extracted phrase with its score and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    /// Surface form of the first occurrence
    pub text: String,
    /// Normalized identity: lowercased lemma sequence joined by spaces
    pub lemma: String,
    /// Mean rank of the constituent tokens
    pub rank_score: f64,
    /// Number of occurrences in the document
    pub occurrence_count: usize,
    /// Sentences containing at least one occurrence (ascending)
    pub sentence_indices: Vec<usize>,
    /// Token position span `(start, end)` of each occurrence, end exclusive
    pub offsets: Vec<(usize, usize)>,
}

impl Phrase {
    /// Create a new phrase
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        rank_score: f64,
        occurrence_count: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            rank_score,
            occurrence_count,
            sentence_indices: Vec::new(),
            offsets: Vec::new(),
        }
    }

    /// Number of lemmas in the phrase
    pub fn len(&self) -> usize {
        self.lemma.split(' ').filter(|w| !w.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lemma.is_empty()
    }

    /// Whether any occurrence lies in the given sentence
    pub fn occurs_in(&self, sentence_idx: usize) -> bool {
        self.sentence_indices.binary_search(&sentence_idx).is_ok()
    }

    /// Total order used for ranked output.
    ///
    /// 1. `rank_score` descending
    /// 2. `occurrence_count` descending
    /// 3. `text` ascending
    /// 4. `lemma` ascending
    pub fn stable_cmp(&self, other: &Self) -> Ordering {
        other
            .rank_score
            .total_cmp(&self.rank_score)
            .then_with(|| other.occurrence_count.cmp(&self.occurrence_count))
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.lemma.cmp(&other.lemma))
    }
}

// ============================================================================
// Summary sentence
// ============================================================================

/// A sentence selected for an extractive summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySentence {
    /// Index of the source sentence
    pub index: usize,
    /// Reconstructed sentence text
    pub text: String,
    /// Score at the time the sentence was selected
    pub score: f64,
}
