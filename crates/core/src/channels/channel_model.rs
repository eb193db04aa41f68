//! Channel and video domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fetcher::{ChannelInfo, VideoInfo};

/// Locally stored channel record, refreshed on every successful sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// External channel identifier.
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    pub subscriber_count: i64,
    pub view_count: i64,
    pub video_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Locally stored video record, upserted per item during a sync attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// External video identifier.
    pub video_id: String,
    /// Owning channel.
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub duration_seconds: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whether an upsert inserted a new row or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl Channel {
    /// Build a local record from freshly fetched channel data.
    pub fn from_info(info: &ChannelInfo) -> Self {
        let now = Utc::now();
        Self {
            channel_id: info.channel_id.clone(),
            title: info.title.clone(),
            description: info.description.clone(),
            subscriber_count: info.subscriber_count,
            view_count: info.view_count,
            video_count: info.video_count,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Video {
    /// Build a local record from freshly fetched video data.
    pub fn from_info(info: &VideoInfo, channel_id: &str) -> Self {
        let now = Utc::now();
        Self {
            video_id: info.video_id.clone(),
            channel_id: channel_id.to_string(),
            title: info.title.clone(),
            description: info.description.clone(),
            published_at: info.published_at,
            view_count: info.view_count,
            like_count: info.like_count,
            comment_count: info.comment_count,
            duration_seconds: info.duration_seconds,
            thumbnail_url: info.thumbnail_url.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
