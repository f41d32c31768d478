//! InMemoryCheckpointStore - テスト・開発用の checkpoint ストア
//!
//! プロセスが落ちれば watermark も消える。再起動をまたぐ必要があるなら
//! FileCheckpointStore を使う。

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::ports::{CheckpointError, CheckpointStore};

#[derive(Debug, Default)]
pub struct InMemoryCheckpointStore {
    rows: Mutex<HashMap<String, NaiveDate>>,
}

impl InMemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の watermark を持った状態で作る（再起動後の状態を再現する用）
    pub fn with_row(key: impl Into<String>, date: NaiveDate) -> Self {
        let mut rows = HashMap::new();
        rows.insert(key.into(), date);
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Current watermark for `key`, without initializing it.
    pub async fn get(&self, key: &str) -> Option<NaiveDate> {
        self.rows.lock().await.get(key).copied()
    }
}

#[async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn load_or_init(
        &self,
        key: &str,
        default: NaiveDate,
    ) -> Result<NaiveDate, CheckpointError> {
        let mut rows = self.rows.lock().await;
        Ok(*rows.entry(key.to_string()).or_insert(default))
    }

    async fn save(&self, key: &str, date: NaiveDate) -> Result<(), CheckpointError> {
        self.rows.lock().await.insert(key.to_string(), date);
        Ok(())
    }
}
