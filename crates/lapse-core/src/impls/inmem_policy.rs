//! InMemoryPolicySource - 開発用のポリシー置き場
//!
//! 本番ではレコードストア側が `end_date in [start, end)` のクエリを実装する。

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Policy, ScanWindow};
use crate::ports::{PolicySource, SourceError};

#[derive(Debug, Default)]
pub struct InMemoryPolicySource {
    policies: RwLock<Vec<Policy>>,
}

impl InMemoryPolicySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_policies(policies: Vec<Policy>) -> Self {
        Self {
            policies: RwLock::new(policies),
        }
    }

    pub async fn insert(&self, policy: Policy) {
        self.policies.write().await.push(policy);
    }

    pub async fn extend(&self, policies: impl IntoIterator<Item = Policy>) {
        self.policies.write().await.extend(policies);
    }

    pub async fn len(&self) -> usize {
        self.policies.read().await.len()
    }
}

#[async_trait]
impl PolicySource for InMemoryPolicySource {
    async fn find_expiring(&self, window: &ScanWindow) -> Result<Vec<Policy>, SourceError> {
        let policies = self.policies.read().await;
        Ok(policies
            .iter()
            .filter(|p| window.contains(p.end_date))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarId, PolicyId};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn policy(id: u64, end: NaiveDate) -> Policy {
        Policy::new(PolicyId::new(id), CarId::new(1), None, d(2024, 1, 1), end)
    }

    #[tokio::test]
    async fn returns_only_policies_inside_window() {
        let source = InMemoryPolicySource::new();
        source
            .extend([
                policy(1, d(2025, 1, 1)),
                policy(2, d(2025, 1, 3)),
                policy(3, d(2025, 1, 5)),
                policy(4, d(2024, 12, 31)),
            ])
            .await;

        let window = ScanWindow::new(d(2025, 1, 1), d(2025, 1, 5));
        let mut ids: Vec<u64> = source
            .find_expiring(&window)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.get())
            .collect();
        ids.sort();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(source.len().await, 4);
    }

    #[tokio::test]
    async fn empty_window_returns_nothing() {
        let source = InMemoryPolicySource::from_policies(vec![policy(1, d(2025, 1, 5))]);
        let window = ScanWindow::new(d(2025, 1, 5), d(2025, 1, 5));
        assert!(source.find_expiring(&window).await.unwrap().is_empty());
    }
}
