//! Phrase extraction components
//!
//! This module provides POS-run candidate detection and phrase aggregation
//! with deduplication by normalized lemma sequence.

pub mod chunker;
pub mod extraction;
