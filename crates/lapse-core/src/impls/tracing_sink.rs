use crate::domain::ExpirationNotice;
use crate::ports::{NotificationSink, SinkError};

/// Emits each notice as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit(&self, notice: &ExpirationNotice) -> Result<(), SinkError> {
        tracing::info!(
            policy_id = notice.policy_id.get(),
            provider = %notice.provider,
            end_date = %notice.end_date,
            "Policy {} from {} expired on {}",
            notice.policy_id.get(),
            notice.provider,
            notice.end_date
        );
        Ok(())
    }
}
