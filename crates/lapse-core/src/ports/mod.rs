//! Ports - 抽象化レイヤー
//!
//! スキャナが外部に求めるものはこれだけです：
//! - 時刻（Clock）
//! - watermark の読み書き（CheckpointStore）
//! - 期限切れ候補の範囲検索（PolicySource）
//! - 通知の送出（NotificationSink）
//!
//! ストレージ技術は問いません。実装は `impls` か、利用側のクレートに置きます。

pub mod checkpoint_store;
pub mod clock;
pub mod notification_sink;
pub mod policy_source;

pub use self::checkpoint_store::{CheckpointError, CheckpointStore};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::notification_sink::{NotificationSink, SinkError};
pub use self::policy_source::{PolicySource, SourceError};
