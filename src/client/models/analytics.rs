//! Analytics and dashboard aggregates

use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_sessions: u64,

    #[serde(default)]
    pub total_messages: u64,

    #[serde(default)]
    pub active_agents: u64,

    /// Average messages per session, absent when there are no sessions
    #[serde(default)]
    pub avg_messages_per_session: Option<f64>,
}

/// One day of usage in a time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsagePoint {
    /// Day in YYYY-MM-DD form
    pub date: String,

    #[serde(default)]
    pub sessions: u64,

    #[serde(default)]
    pub messages: u64,
}
