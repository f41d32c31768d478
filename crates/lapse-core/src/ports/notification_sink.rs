//! NotificationSink port - 期限切れ通知の送出先
//!
//! ログでもイベントバスでもキューでもよい。スキャナは同期の `emit` だけを要求する。

use crate::domain::ExpirationNotice;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("notification rejected: {0}")]
    Rejected(String),

    #[error("notification sink closed")]
    Closed,
}

pub trait NotificationSink: Send + Sync {
    fn emit(&self, notice: &ExpirationNotice) -> Result<(), SinkError>;
}
