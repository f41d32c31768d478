//! RecordingSink - 送出された通知をメモリに溜める
//!
//! テストで「何件・どのポリシーが通知されたか」を確認する用。
//! `fail_next(n)` で次の n 回の emit を失敗させられる。

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{ExpirationNotice, PolicyId};
use crate::ports::{NotificationSink, SinkError};

#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<ExpirationNotice>>,
    failures_left: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` emits fail with `SinkError::Rejected`.
    pub fn fail_next(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    pub fn notices(&self) -> Vec<ExpirationNotice> {
        match self.notices.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// IDs in emission order.
    pub fn policy_ids(&self) -> Vec<PolicyId> {
        self.notices().iter().map(|n| n.policy_id).collect()
    }

    pub fn len(&self) -> usize {
        self.notices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, notice: &ExpirationNotice) -> Result<(), SinkError> {
        let armed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            return Err(SinkError::Rejected(format!(
                "injected failure for {}",
                notice.policy_id
            )));
        }

        let mut guard = self.notices.lock().map_err(|_| SinkError::Closed)?;
        guard.push(notice.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn notice(id: u64) -> ExpirationNotice {
        ExpirationNotice {
            policy_id: PolicyId::new(id),
            provider: "AXA".to_string(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn records_in_order() {
        let sink = RecordingSink::new();
        sink.emit(&notice(1)).unwrap();
        sink.emit(&notice(2)).unwrap();
        assert_eq!(sink.policy_ids(), vec![PolicyId::new(1), PolicyId::new(2)]);
    }

    #[test]
    fn injected_failures_are_consumed() {
        let sink = RecordingSink::new();
        sink.fail_next(1);

        assert!(sink.emit(&notice(1)).is_err());
        assert!(sink.emit(&notice(2)).is_ok());
        assert_eq!(sink.policy_ids(), vec![PolicyId::new(2)]);
    }
}
