//! FileCheckpointStore - JSON ファイル 1 つに watermark を保存する
//!
//! ```json
//! { "PolicyExpirationChecker.LastRunUtc": "2025-01-05" }
//! ```
//!
//! 書き込みは `<path>.tmp` に書いて fsync してから rename する。
//! rename が失敗したら tmp は消す。
//!
//! ファイルが無いときだけ「行なし」とみなす。空のファイルは Corrupt
//! （today で作り直すと前回の watermark 以降の通知が消える）。

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::{CheckpointError, CheckpointStore};

type Rows = BTreeMap<String, NaiveDate>;

#[derive(Debug)]
pub struct FileCheckpointStore {
    path: PathBuf,
    // read-modify-write を直列化する
    lock: Mutex<()>,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_rows(&self) -> Result<Rows, CheckpointError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Rows::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(CheckpointError::Corrupt(format!(
                "{}: file is empty",
                self.path.display()
            )));
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            CheckpointError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write_rows(&self, rows: &Rows) -> Result<(), CheckpointError> {
        let json = serde_json::to_vec_pretty(rows)
            .map_err(|e| CheckpointError::Corrupt(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(&json).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn load_or_init(
        &self,
        key: &str,
        default: NaiveDate,
    ) -> Result<NaiveDate, CheckpointError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read_rows().await?;
        if let Some(date) = rows.get(key) {
            return Ok(*date);
        }

        tracing::info!(
            key,
            watermark = %default,
            path = %self.path.display(),
            "initializing missing checkpoint"
        );
        rows.insert(key.to_string(), default);
        self.write_rows(&rows).await?;
        Ok(default)
    }

    async fn save(&self, key: &str, date: NaiveDate) -> Result<(), CheckpointError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.read_rows().await?;
        if rows.get(key) == Some(&date) {
            return Ok(());
        }
        rows.insert(key.to_string(), date);
        self.write_rows(&rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn missing_file_initializes_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        let store = FileCheckpointStore::new(&path);

        let loaded = store.load_or_init("scanner", d(2025, 1, 5)).await.unwrap();
        assert_eq!(loaded, d(2025, 1, 5));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn watermark_survives_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");

        {
            let store = FileCheckpointStore::new(&path);
            store.load_or_init("scanner", d(2025, 1, 1)).await.unwrap();
            store.save("scanner", d(2025, 1, 5)).await.unwrap();
        }

        // "restart"
        let store = FileCheckpointStore::new(&path);
        let loaded = store.load_or_init("scanner", d(2030, 1, 1)).await.unwrap();
        assert_eq!(loaded, d(2025, 1, 5));
    }

    #[tokio::test]
    async fn save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("checkpoint.json"));

        store.save("a", d(2025, 1, 1)).await.unwrap();
        store.save("b", d(2025, 2, 1)).await.unwrap();
        store.save("b", d(2025, 2, 1)).await.unwrap();

        assert_eq!(store.load_or_init("a", d(2000, 1, 1)).await.unwrap(), d(2025, 1, 1));
        assert_eq!(store.load_or_init("b", d(2000, 1, 1)).await.unwrap(), d(2025, 2, 1));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileCheckpointStore::new(&path);
        let err = store.load_or_init("scanner", d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, CheckpointError::Corrupt(_)));
    }

    #[tokio::test]
    async fn truncated_file_does_not_reset_watermark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        let store = FileCheckpointStore::new(&path);
        store.save("scanner", d(2025, 1, 1)).await.unwrap();

        // 電源断で 0 バイトになったファイル
        std::fs::write(&path, b"").unwrap();

        let err = store.load_or_init("scanner", d(2025, 1, 5)).await.unwrap_err();
        assert!(matches!(err, CheckpointError::Corrupt(_)));
        assert!(std::fs::read(&path).unwrap().is_empty());
    }

    #[tokio::test]
    async fn whitespace_only_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        std::fs::write(&path, b"  \n").unwrap();

        let store = FileCheckpointStore::new(&path);
        let err = store.save("scanner", d(2025, 1, 5)).await.unwrap_err();
        assert!(matches!(err, CheckpointError::Corrupt(_)));
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        // 中身のあるディレクトリには rename できない
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), b"x").unwrap();

        let store = FileCheckpointStore::new(&path);
        let mut rows = Rows::new();
        rows.insert("scanner".to_string(), d(2025, 1, 5));

        assert!(store.write_rows(&rows).await.is_err());
        assert!(!dir.path().join("checkpoint.json.tmp").exists());
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkpoint.json");
        let store = FileCheckpointStore::new(&path);

        store.save("scanner", d(2025, 1, 5)).await.unwrap();
        assert!(!dir.path().join("checkpoint.json.tmp").exists());
    }
}
