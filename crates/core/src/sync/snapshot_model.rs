//! Immutable per-sync data snapshots.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::fetcher::{ChannelInfo, VideoInfo};

/// Captured payload of one successful fetch.
///
/// Write-once; never mutated after creation. Retained until the external
/// retention sweep removes snapshots older than the configured
/// `keep_snapshot_days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnapshot {
    pub snapshot_id: String,
    /// Owning sync attempt.
    pub sync_id: String,
    pub channel_id: String,
    pub channel_title: String,
    pub subscriber_count: i64,
    pub view_count: i64,
    pub video_count: i32,
    /// Full video list as fetched, kept opaque.
    pub videos_data: Value,
    pub sync_timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ChannelSnapshot {
    /// Build a snapshot from freshly fetched channel stats and video list.
    pub fn from_fetch(
        sync_id: &str,
        channel: &ChannelInfo,
        videos: &[VideoInfo],
    ) -> Result<Self> {
        let now = Utc::now();
        Ok(Self {
            snapshot_id: uuid::Uuid::new_v4().to_string(),
            sync_id: sync_id.to_string(),
            channel_id: channel.channel_id.clone(),
            channel_title: channel.title.clone(),
            subscriber_count: channel.subscriber_count,
            view_count: channel.view_count,
            video_count: videos.len() as i32,
            videos_data: serde_json::to_value(videos)?,
            sync_timestamp: now,
            created_at: now,
        })
    }
}

/// Trait for snapshot persistence operations.
#[async_trait]
pub trait ChannelSnapshotRepositoryTrait: Send + Sync {
    /// Persist a snapshot.
    async fn create(&self, snapshot: ChannelSnapshot) -> Result<ChannelSnapshot>;

    /// Get the snapshot belonging to a sync attempt.
    fn get_by_sync_id(&self, sync_id: &str) -> Result<Option<ChannelSnapshot>>;

    /// Most recent snapshot for a channel.
    fn get_latest_for_channel(&self, channel_id: &str) -> Result<Option<ChannelSnapshot>>;

    /// Remove snapshots older than the cutoff. Hook for the external
    /// retention sweep; the engine itself never calls this.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}
