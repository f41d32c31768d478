//! lapse-core
//!
//! Periodic policy-expiration scanner.
//!
//! 増え続けるポリシー集合を定期的に走査し、新しく期限切れになったものを
//! 一度だけ通知する。watermark（最後に処理し終えた日付）を checkpoint として
//! 保存するので、再起動しても取りこぼしや重複は最大 1 窓分に収まる。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, policy, window, notice, state）
//! - **ports**: 抽象化レイヤー（Clock, CheckpointStore, PolicySource, NotificationSink）
//! - **impls**: ports の実装（InMemory, File, Tracing, Recording）
//! - **app**: スキャナ本体とホスト（config, scanner, host, status）
//! - **error**: 反復単位のエラー

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use app::{ExpirationScanner, ScannerConfig, ScannerHost, ScannerStatus};
pub use error::ScanError;
