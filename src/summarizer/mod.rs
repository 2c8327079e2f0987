//! Summarization components
//!
//! Provides extractive summarization: greedy residual-weight selection with
//! a diversity penalty, or unit-vector similarity to the document.

pub mod selector;
pub mod unit_vector;
