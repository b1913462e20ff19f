//! Error types for normalization and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// A single malformed audit record. The record is dropped and the batch
/// continues.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The event timestamp could not be parsed.
    #[error("unparseable event timestamp '{raw}': {source}")]
    BadTimestamp {
        raw: String,
        source: chrono::ParseError,
    },

    /// The raw payload could not be re-serialized for the More Info column.
    #[error("failed to serialize event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Failure producing or writing one report artifact. Other formats in the
/// same run are still attempted.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
