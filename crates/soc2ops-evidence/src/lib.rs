//! Synthetic SOC 2 audit evidence
//!
//! This crate builds a synthetic employee directory and four dependent
//! evidence record sets that reference it:
//! - access logs
//! - audit trails
//! - incident reports
//! - risk assessment reports
//!
//! Each set is persisted as a timestamped, pretty-printed JSON snapshot.

pub mod config;
pub mod fake;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod store;

pub use config::GeneratorConfig;
pub use generator::EvidenceGenerator;
pub use model::*;
pub use pipeline::{EvidenceFile, EvidencePipeline, EvidenceRun, PipelineStage};
pub use store::EvidenceStore;

/// Evidence operation result type
pub type EvidenceResult<T> = Result<T, EvidenceError>;

/// Evidence error types
#[derive(thiserror::Error, Debug)]
pub enum EvidenceError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
