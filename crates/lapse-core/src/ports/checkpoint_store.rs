//! CheckpointStore port - watermark（最後に処理し終えた日付）の永続化
//!
//! key ごとに 1 行だけ存在する。書き手はスキャナ 1 つだけ（single-writer）。

use async_trait::async_trait;
use chrono::NaiveDate;

/// CheckpointError は checkpoint の読み書きエラー
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("checkpoint store unavailable: {0}")]
    Unavailable(String),

    #[error("checkpoint io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint data is corrupt: {0}")]
    Corrupt(String),
}

/// CheckpointStore は名前付き watermark を 1 つ保持する
///
/// # 契約
/// - 行が無いのはエラーではない。`default` で作成してそれを返す
/// - `save` は同じ値で何度呼んでもよい（冪等）
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Load the watermark for `key`, creating it with `default` when absent.
    async fn load_or_init(&self, key: &str, default: NaiveDate)
        -> Result<NaiveDate, CheckpointError>;

    /// Persist a new watermark for `key`.
    async fn save(&self, key: &str, date: NaiveDate) -> Result<(), CheckpointError>;
}
