//! Per-attempt performance telemetry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Performance counters for one sync attempt.
///
/// Appended after the owning record reaches a terminal state. Write-once and
/// never read back by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetrics {
    pub metric_id: String,
    pub sync_id: String,
    pub channel_id: String,
    pub total_duration_seconds: f64,
    pub api_calls_made: i32,
    pub videos_processed: i32,
    pub videos_added: i32,
    pub videos_updated: i32,
    pub videos_removed: i32,
    /// Data-API errors observed during the attempt.
    pub api_errors: i32,
    pub rate_limit_hits: i32,
    pub timeout_errors: i32,
    /// Per-item persistence failures absorbed by the pipeline.
    pub upsert_errors: i32,
    pub recorded_at: DateTime<Utc>,
}

impl SyncMetrics {
    pub fn new(sync_id: &str, channel_id: &str) -> Self {
        Self {
            metric_id: uuid::Uuid::new_v4().to_string(),
            sync_id: sync_id.to_string(),
            channel_id: channel_id.to_string(),
            total_duration_seconds: 0.0,
            api_calls_made: 0,
            videos_processed: 0,
            videos_added: 0,
            videos_updated: 0,
            videos_removed: 0,
            api_errors: 0,
            rate_limit_hits: 0,
            timeout_errors: 0,
            upsert_errors: 0,
            recorded_at: Utc::now(),
        }
    }
}

/// Trait for metrics persistence. Append-only.
#[async_trait]
pub trait SyncMetricsRepositoryTrait: Send + Sync {
    /// Append one metrics row.
    async fn record(&self, metrics: SyncMetrics) -> Result<()>;
}
