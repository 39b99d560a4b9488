//! DTO for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkStats;

/// Access statistics for a single short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            click_count: stats.click_count,
            created_at: stats.created_at,
            expires_at: stats.expires_at,
            is_active: stats.is_active,
        }
    }
}
