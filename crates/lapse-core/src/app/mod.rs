//! App - アプリケーション層
//!
//! ports を組み合わせてスキャナを組み立てます。
//!
//! # 主要コンポーネント
//! - **ScannerConfig**: checkpoint key と反復間隔
//! - **ExpirationScanner**: 状態機械とループ（load→window→query→notify→checkpoint→sleep）
//! - **ScannerHost**: 起動・停止・キャンセル伝播
//! - **ScannerStatus**: watch で配られる状態スナップショット

pub mod config;
pub mod host;
pub mod scanner;
pub mod status;

pub use self::config::{ConfigError, ScannerConfig};
pub use self::host::{HostError, ScannerHost};
pub use self::scanner::{ExpirationScanner, IterationReport};
pub use self::status::{ScanStats, ScannerStatus};
