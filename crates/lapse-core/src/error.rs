use thiserror::Error;

use crate::ports::{CheckpointError, SinkError, SourceError};

/// Iteration-level error.
///
/// どれもループを止めない。ログに出して、watermark はそのまま次の反復へ。
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),

    #[error("policy source: {0}")]
    Source(#[from] SourceError),

    #[error("notification sink: {0}")]
    Sink(#[from] SinkError),
}

impl ScanError {
    /// Short label for logs and status snapshots.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Checkpoint(_) => "checkpoint",
            ScanError::Source(_) => "source",
            ScanError::Sink(_) => "sink",
        }
    }
}
