//! PolicySource port - 期限切れ候補の検索（読み取り専用）

use async_trait::async_trait;

use crate::domain::{Policy, ScanWindow};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("policy source unavailable: {0}")]
    Unavailable(String),
}

/// PolicySource は `end_date in [start, end)` の範囲検索を提供
///
/// 副作用なし。返す順序は問わない（スキャナは順序に依存しない）。
#[async_trait]
pub trait PolicySource: Send + Sync {
    async fn find_expiring(&self, window: &ScanWindow) -> Result<Vec<Policy>, SourceError>;
}
