use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CarId, PolicyId};

/// Insurance policy as seen by the expiration scanner.
///
/// スキャナにとっては読み取り専用。日付は時刻成分を持たない暦日。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub car_id: CarId,
    #[serde(default)]
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Policy {
    pub fn new(
        id: PolicyId,
        car_id: CarId,
        provider: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            car_id,
            provider,
            start_date,
            end_date,
        }
    }
}
