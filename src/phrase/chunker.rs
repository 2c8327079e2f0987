//! Candidate phrase detection
//!
//! A candidate is a maximal run of consecutive tokens whose POS tag is in the
//! included set. Runs never cross sentences. Runs longer than `max_length`
//! are split greedily from the left into chunks of `max_length` tokens; the
//! last chunk takes the remainder.

use crate::nlp::filter::TokenFilter;
use crate::types::{surface_text, Document, Sentence, Token};

/// A candidate phrase occurrence inside one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseSpan {
    /// Index of the sentence in `Document::sentences`
    pub sentence: usize,
    /// First token, as an index into the sentence's tokens
    pub start: usize,
    /// One past the last token
    pub end: usize,
}

impl PhraseSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The tokens covered by this span
    pub fn tokens<'a>(&self, doc: &'a Document) -> &'a [Token] {
        &doc.sentences[self.sentence].tokens[self.start..self.end]
    }
}

/// POS-run phrase chunker
#[derive(Debug, Clone)]
pub struct PhraseChunker {
    max_length: usize,
}

impl Default for PhraseChunker {
    fn default() -> Self {
        Self { max_length: 4 }
    }
}

impl PhraseChunker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of tokens in a chunk (at least 1)
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.max(1);
        self
    }

    /// Candidate spans of the whole document, in document order
    pub fn extract_chunks(&self, doc: &Document, filter: &TokenFilter) -> Vec<PhraseSpan> {
        let mut chunks = Vec::new();
        for (sent_idx, sentence) in doc.sentences.iter().enumerate() {
            self.extract_chunks_from_sentence(sent_idx, sentence, filter, &mut chunks);
        }
        chunks
    }

    /// Extract chunks from a single sentence
    fn extract_chunks_from_sentence(
        &self,
        sent_idx: usize,
        sentence: &Sentence,
        filter: &TokenFilter,
        chunks: &mut Vec<PhraseSpan>,
    ) {
        let tokens = &sentence.tokens;
        let mut i = 0;

        while i < tokens.len() {
            if !filter.has_included_pos(&tokens[i]) {
                i += 1;
                continue;
            }

            // Maximal run [i, run_end)
            let mut run_end = i;
            while run_end < tokens.len() && filter.has_included_pos(&tokens[run_end]) {
                run_end += 1;
            }

            let mut start = i;
            while start < run_end {
                let end = (start + self.max_length).min(run_end);
                chunks.push(PhraseSpan {
                    sentence: sent_idx,
                    start,
                    end,
                });
                start = end;
            }

            i = run_end;
        }
    }
}

/// Surface text of a span
pub fn chunk_text(doc: &Document, span: &PhraseSpan) -> String {
    surface_text(span.tokens(doc))
}

/// Normalized identity of a span: lowercased lemmas joined by spaces
pub fn chunk_lemma(doc: &Document, span: &PhraseSpan) -> String {
    span.tokens(doc)
        .iter()
        .map(|t| t.lemma.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
