//! Metric snapshot shapes returned by the two analytics endpoints.

use serde::{Deserialize, Serialize};

/// Source A: VimGolf solution analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VimStats {
    pub total_solutions: u64,
    pub average_keystrokes: f64,
    pub average_time_taken_seconds: f64,
    pub unique_submitters: u64,
}

/// Source B: news app usage analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsStats {
    pub total_users: u64,
    pub new_users_today: u64,
    pub dau: u64,
    pub app_opens_today: u64,
    pub likes_today: u64,
    pub shares_today: u64,
    pub total_likes: u64,
}

/// Both sources captured together; persisted as the `stats` object of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedStats {
    pub vim: VimStats,
    pub news: NewsStats,
}
