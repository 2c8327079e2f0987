//! TextRank variants
//!
//! This module provides specialized TextRank variants:
//! - PositionRank: Biases towards words appearing earlier in the document
//! - BiasedTextRank: Allows focusing on specific topic words

pub mod biased_textrank;
pub mod position_rank;

use crate::config::TextRankConfig;
use crate::errors::Result;
use crate::pipeline::artifacts::ExtractionResult;
use crate::pipeline::observer::NoopObserver;
use crate::pipeline::runner::{BiasedTextRankPipeline, PositionRankPipeline, TextRankPipeline};
use crate::types::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    TextRank,
    PositionRank,
    BiasedTextRank,
}

impl Variant {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "position_rank" | "positionrank" | "position" => Variant::PositionRank,
            "biased_textrank" | "biased" | "biasedtextrank" => Variant::BiasedTextRank,
            _ => Variant::TextRank,
        }
    }

    /// Run this variant's pipeline on a document
    pub fn run(self, doc: &Document, cfg: &TextRankConfig) -> Result<ExtractionResult> {
        let mut obs = NoopObserver;
        match self {
            Variant::TextRank => TextRankPipeline::base_textrank().run(doc, cfg, &mut obs),
            Variant::PositionRank => PositionRankPipeline::position_rank().run(doc, cfg, &mut obs),
            Variant::BiasedTextRank => {
                BiasedTextRankPipeline::biased_textrank().run(doc, cfg, &mut obs)
            }
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Variant::parse(value))
    }
}
