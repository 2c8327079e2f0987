//! Token eligibility
//!
//! The POS / stopword filter is built once from the configuration and then
//! evaluated as a pure predicate per token.

use crate::config::TextRankConfig;
use crate::nlp::stopwords::StopwordFilter;
use crate::types::{PosTag, Token};
use rustc_hash::FxHashSet;

/// Decides which tokens become graph nodes and phrase constituents
#[derive(Debug, Clone)]
pub struct TokenFilter {
    pos_tags: FxHashSet<PosTag>,
    exclude_stopwords: bool,
    stoplist: StopwordFilter,
}

impl TokenFilter {
    /// Create a filter from explicit parts
    pub fn new(pos_tags: &[PosTag], exclude_stopwords: bool, stoplist: StopwordFilter) -> Self {
        Self {
            pos_tags: pos_tags.iter().copied().collect(),
            exclude_stopwords,
            stoplist,
        }
    }

    /// Build the filter described by a configuration
    pub fn from_config(cfg: &TextRankConfig) -> Self {
        let mut stoplist = match cfg.stopword_language.as_deref() {
            Some(lang) => StopwordFilter::for_language(lang).unwrap_or_else(|| {
                tracing::warn!(language = lang, "no built-in stopword list, ignoring");
                StopwordFilter::empty()
            }),
            None => StopwordFilter::empty(),
        };
        stoplist.add_stopwords(&cfg.stopwords);

        Self::new(&cfg.included_pos_tags, cfg.exclude_stopwords, stoplist)
    }

    /// Whether the token's POS tag is in the included set
    pub fn has_included_pos(&self, token: &Token) -> bool {
        self.pos_tags.contains(&token.pos)
    }

    /// Whether the token counts as a stopword (front-end flag or stoplist)
    pub fn is_stopword(&self, token: &Token) -> bool {
        token.is_stopword || self.stoplist.is_stopword(&token.lemma)
    }

    /// Whether the token becomes a graph node
    pub fn is_eligible(&self, token: &Token) -> bool {
        self.has_included_pos(token) && !(self.exclude_stopwords && self.is_stopword(token))
    }
}
