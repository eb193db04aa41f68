//! Wire models and errors for the external data API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Channel statistics as returned by the data API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub subscriber_count: i64,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub video_count: i32,
}

/// A single video as returned by the data API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    pub duration_seconds: Option<i32>,
    pub thumbnail_url: Option<String>,
}

/// Result of one daily-metrics collection pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetricsSummary {
    /// Number of videos the collector walked.
    pub videos_processed: i32,
}

/// Errors from the external data API.
///
/// The variants mirror the SyncMetrics error counters so the pipeline can
/// classify failures without string matching.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Data API rate limit exceeded")]
    RateLimited,

    #[error("Data API request timed out")]
    Timeout,

    #[error("Data API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode data API response: {0}")]
    Decode(String),

    #[error("Data API request failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// Whether this failure counts as a rate-limit hit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited)
    }

    /// Whether this failure counts as a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout)
    }
}
