//! Database model for local video records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use creatorpulse_core::channels::Video;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::videos)]
#[diesel(primary_key(video_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VideoDB {
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub duration_seconds: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<VideoDB> for Video {
    fn from(db: VideoDB) -> Self {
        Self {
            video_id: db.video_id,
            channel_id: db.channel_id,
            title: db.title,
            description: db.description,
            published_at: db.published_at.as_deref().map(parse_timestamp),
            view_count: db.view_count,
            like_count: db.like_count,
            comment_count: db.comment_count,
            duration_seconds: db.duration_seconds,
            thumbnail_url: db.thumbnail_url,
            is_active: db.is_active,
            created_at: parse_timestamp(&db.created_at),
            updated_at: parse_timestamp(&db.updated_at),
        }
    }
}

impl From<Video> for VideoDB {
    fn from(domain: Video) -> Self {
        Self {
            video_id: domain.video_id,
            channel_id: domain.channel_id,
            title: domain.title,
            description: domain.description,
            published_at: domain.published_at.map(|dt| dt.to_rfc3339()),
            view_count: domain.view_count,
            like_count: domain.like_count,
            comment_count: domain.comment_count,
            duration_seconds: domain.duration_seconds,
            thumbnail_url: domain.thumbnail_url,
            is_active: domain.is_active,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}
