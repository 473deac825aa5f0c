//! ForceTrace Application
//!
//! Headless host for the ForceTrace engine: reads and writes trace files,
//! replays recorded input and reports results to the user.

pub mod files;
pub mod replay;

pub use files::{TraceFiles, read_text};
pub use replay::{ReplayStats, ReplayStep, Replayer, parse_log};

use forcetrace_core::{CodecError, EngineConfig, ImportReport, StylusEngine};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Config(String),
    #[error("Replay log line {line}: {message}")]
    Replay { line: usize, message: String },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Load engine settings from a JSON file.
pub fn load_config(path: &std::path::Path) -> AppResult<EngineConfig> {
    let json = read_text(path)?;
    EngineConfig::from_json(&json).map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
}

/// User-facing summary of an import.
pub fn describe_import(report: &ImportReport) -> String {
    let mut message = format!("Imported {} points", report.imported);
    if report.skipped > 0 {
        message.push_str(&format!(
            ", {} entries couldn't be converted",
            report.skipped
        ));
    }
    message
}

/// Import a trace into a fresh engine.
pub fn import_trace(text: &str, config: EngineConfig) -> AppResult<(StylusEngine, ImportReport)> {
    let mut engine = StylusEngine::with_config(config);
    let report = engine.import_current(text)?;
    Ok((engine, report))
}
