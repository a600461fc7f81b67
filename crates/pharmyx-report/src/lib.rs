//! pharmyx-report — Fusion of the three drug-safety sources and the
//! pipeline that turns one drug name into a clinical report.

pub mod fusion;
pub mod pipeline;
pub mod prompt;

pub use pipeline::{ReportPipeline, ReportRun};
