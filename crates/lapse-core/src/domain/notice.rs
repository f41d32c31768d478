use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Policy, PolicyId};

/// Provider name used when a policy has none on record.
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// One "this policy has expired" announcement.
///
/// NotificationSink に渡される唯一のペイロード。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationNotice {
    pub policy_id: PolicyId,
    pub provider: String,
    pub end_date: NaiveDate,
}

impl From<&Policy> for ExpirationNotice {
    fn from(policy: &Policy) -> Self {
        Self {
            policy_id: policy.id,
            provider: policy
                .provider
                .clone()
                .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string()),
            end_date: policy.end_date,
        }
    }
}

impl fmt::Display for ExpirationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Policy {} from {} expired on {}",
            self.policy_id.get(),
            self.provider,
            self.end_date
        )
    }
}
