//! Database model for local channel records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use creatorpulse_core::channels::Channel;

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
#[diesel(table_name = crate::schema::channels)]
#[diesel(primary_key(channel_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChannelDB {
    pub channel_id: String,
    pub title: String,
    pub description: Option<String>,
    pub subscriber_count: i64,
    pub view_count: i64,
    pub video_count: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<ChannelDB> for Channel {
    fn from(db: ChannelDB) -> Self {
        Self {
            channel_id: db.channel_id,
            title: db.title,
            description: db.description,
            subscriber_count: db.subscriber_count,
            view_count: db.view_count,
            video_count: db.video_count,
            is_active: db.is_active,
            created_at: parse_timestamp(&db.created_at),
            updated_at: parse_timestamp(&db.updated_at),
        }
    }
}

impl From<Channel> for ChannelDB {
    fn from(domain: Channel) -> Self {
        Self {
            channel_id: domain.channel_id,
            title: domain.title,
            description: domain.description,
            subscriber_count: domain.subscriber_count,
            view_count: domain.view_count,
            video_count: domain.video_count,
            is_active: domain.is_active,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}
