//! Pipeline validation, composition, and execution.
//!
//! ## Submodules
//!
//! - [`artifacts`]: typed results flowing between stages
//! - [`traits`]: stage trait definitions (teleport strategies)
//! - [`runner`]: pipeline orchestration and artifact threading
//! - [`observer`]: logging, profiling, and debug hooks
//! - [`validation`]: configuration rule engine

pub mod artifacts;
pub mod observer;
pub mod runner;
pub mod traits;
pub mod validation;

pub use artifacts::{ExtractionResult, NodeRanks, RankedNode};

pub use observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder,
    StageTimingObserver, TracingObserver, STAGE_GRAPH, STAGE_PHRASES, STAGE_RANK, STAGE_SUMMARY,
    STAGE_TELEPORT, STAGE_VALIDATE,
};

pub use runner::{BiasedTextRankPipeline, Pipeline, PositionRankPipeline, TextRankPipeline};

pub use traits::{
    ConfiguredTeleportBuilder, FocusTermsTeleportBuilder, PositionTeleportBuilder,
    TeleportBuilder, UniformTeleportBuilder,
};

pub use validation::{
    ConfigDiagnostic, ErrorCode, Severity, ValidationEngine, ValidationReport, ValidationRule,
};
