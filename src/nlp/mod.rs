//! Token-level linguistic filters
//!
//! Tokenization, tagging and lemmatization happen upstream; this module only
//! decides which annotated tokens take part in the graph.

pub mod filter;
pub mod stopwords;
