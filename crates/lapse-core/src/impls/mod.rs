//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryCheckpointStore**: テスト・開発用
//! - **FileCheckpointStore**: JSON ファイル 1 つに保存（再起動をまたぐ）
//! - **InMemoryPolicySource**: 開発用のポリシー置き場
//! - **TracingSink**: 通知を tracing のイベントとして出す（本番デフォルト）
//! - **RecordingSink**: 通知をメモリに溜める（テスト用）

pub mod file_checkpoint;
pub mod inmem_checkpoint;
pub mod inmem_policy;
pub mod recording_sink;
pub mod tracing_sink;

pub use self::file_checkpoint::FileCheckpointStore;
pub use self::inmem_checkpoint::InMemoryCheckpointStore;
pub use self::inmem_policy::InMemoryPolicySource;
pub use self::recording_sink::RecordingSink;
pub use self::tracing_sink::TracingSink;
