//! Real-time metrics query records.

use serde::{Deserialize, Serialize};

/// Metric path descriptor from the `metric` type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: i64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_realtime_available: bool,
    #[serde(default)]
    pub unit_display_string: String,
}

/// Real-time query instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRealTimeQuery {
    pub id: i64,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub interval: u32,
    #[serde(default)]
    pub expiration: Option<String>,
}

/// One sample row of a query result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQueryResult {
    pub query_id: i64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub timestamp: String,
    /// Shape varies by metric path (scalar, or nested per-object maps).
    #[serde(default)]
    pub values: serde_json::Value,
}

/// Body posted to `/api/types/metricRealTimeQuery/instances`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMetricRealTimeQueryBody {
    pub paths: Vec<String>,
    pub interval: u32,
}
