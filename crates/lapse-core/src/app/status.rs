//! Status - スキャナの状態スナップショット
//!
//! `tokio::sync::watch` で配られる。ヘルスチェックなどに埋め込めるよう Serialize。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ScanWindow, ScannerState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Iterations started (cancelled-at-entry ones are not counted).
    pub iterations: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Notices emitted, including repeats after a failed iteration.
    pub notified: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerStatus {
    pub state: ScannerState,
    /// Last watermark read from or written to the checkpoint store.
    pub watermark: Option<NaiveDate>,
    pub last_window: Option<ScanWindow>,
    pub last_error: Option<String>,
    pub stats: ScanStats,
}
