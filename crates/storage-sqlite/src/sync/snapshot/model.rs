//! Database model for channel snapshots.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use creatorpulse_core::sync::ChannelSnapshot;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::channel_snapshots)]
#[diesel(primary_key(snapshot_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChannelSnapshotDB {
    pub snapshot_id: String,
    pub sync_id: String,
    pub channel_id: String,
    pub channel_title: String,
    pub subscriber_count: i64,
    pub view_count: i64,
    pub video_count: i32,
    pub videos_data: String,
    pub sync_timestamp: String,
    pub created_at: String,
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<ChannelSnapshotDB> for ChannelSnapshot {
    fn from(db: ChannelSnapshotDB) -> Self {
        Self {
            snapshot_id: db.snapshot_id,
            sync_id: db.sync_id,
            channel_id: db.channel_id,
            channel_title: db.channel_title,
            subscriber_count: db.subscriber_count,
            view_count: db.view_count,
            video_count: db.video_count,
            videos_data: serde_json::from_str(&db.videos_data)
                .unwrap_or(serde_json::Value::Null),
            sync_timestamp: parse_timestamp(&db.sync_timestamp),
            created_at: parse_timestamp(&db.created_at),
        }
    }
}

impl From<ChannelSnapshot> for ChannelSnapshotDB {
    fn from(domain: ChannelSnapshot) -> Self {
        Self {
            snapshot_id: domain.snapshot_id,
            sync_id: domain.sync_id,
            channel_id: domain.channel_id,
            channel_title: domain.channel_title,
            subscriber_count: domain.subscriber_count,
            view_count: domain.view_count,
            video_count: domain.video_count,
            videos_data: serde_json::to_string(&domain.videos_data).unwrap_or_default(),
            sync_timestamp: domain.sync_timestamp.to_rfc3339(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }
}
