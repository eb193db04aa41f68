//! Capability traits for external channel data collaborators.

use async_trait::async_trait;

use super::fetcher_model::{ChannelInfo, DailyMetricsSummary, VideoInfo};
use crate::errors::Result;

/// Source of current channel/video data.
#[async_trait]
pub trait ChannelDataFetcher: Send + Sync {
    /// Fetch current statistics for a channel.
    async fn fetch_channel_info(&self, channel_id: &str) -> Result<ChannelInfo>;

    /// Fetch the complete video list for a channel, not a capped page.
    async fn fetch_all_videos(&self, channel_id: &str) -> Result<Vec<VideoInfo>>;

    /// Fetch up to `max` most recent videos for a channel.
    async fn fetch_recent_videos(&self, channel_id: &str, max: usize) -> Result<Vec<VideoInfo>>;
}

/// Historical growth snapshot collector for a channel and its videos.
///
/// The growth arithmetic lives behind this trait; the sync engine only
/// triggers a collection pass and charges a fixed API-call estimate for it.
#[async_trait]
pub trait MetricsCollector: Send + Sync {
    /// Collect the daily metrics snapshot for a channel.
    async fn collect_daily_metrics(&self, channel_id: &str) -> Result<DailyMetricsSummary>;
}
