//! Repository traits for local channel/video records.

use async_trait::async_trait;

use super::channel_model::{Channel, UpsertOutcome, Video};
use crate::errors::Result;

/// Persistence operations for channel records.
#[async_trait]
pub trait ChannelRepositoryTrait: Send + Sync {
    /// Insert or update a channel keyed by `channel_id`.
    async fn upsert(&self, channel: Channel) -> Result<UpsertOutcome>;

    /// Get a channel by ID.
    fn get_by_id(&self, channel_id: &str) -> Result<Option<Channel>>;
}

/// Persistence operations for video records.
#[async_trait]
pub trait VideoRepositoryTrait: Send + Sync {
    /// Insert or update a video keyed by `video_id`.
    async fn upsert(&self, video: Video) -> Result<UpsertOutcome>;

    /// Get a video by ID.
    fn get_by_id(&self, video_id: &str) -> Result<Option<Video>>;

    /// List all videos belonging to a channel.
    fn list_for_channel(&self, channel_id: &str) -> Result<Vec<Video>>;
}
