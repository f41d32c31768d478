//! State - スキャナの状態機械
//!
//! ```text
//! Idle → Scanning → Notifying → Checkpointing → Sleeping → Scanning ...
//!                     (any) ──cancel──▶ Cancelled
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// ScannerState は ExpirationScanner の現在の状態
///
/// - Idle: 起動前
/// - Scanning: watermark の読み込みと候補の検索
/// - Notifying: 候補ごとに通知を発行
/// - Checkpointing: watermark を today に進めて保存
/// - Sleeping: 次の反復まで待機（キャンセルで即座に起きる）
/// - Cancelled: 終端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScannerState {
    #[default]
    Idle,
    Scanning,
    Notifying,
    Checkpointing,
    Sleeping,
    Cancelled,
}

impl ScannerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScannerState::Idle => "idle",
            ScannerState::Scanning => "scanning",
            ScannerState::Notifying => "notifying",
            ScannerState::Checkpointing => "checkpointing",
            ScannerState::Sleeping => "sleeping",
            ScannerState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScannerState::Cancelled)
    }
}

impl fmt::Display for ScannerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
