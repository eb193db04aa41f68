//! Database model for sync records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use creatorpulse_core::sync::{SyncRecord, SyncStatus};

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
#[diesel(table_name = crate::schema::sync_records)]
#[diesel(primary_key(sync_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SyncRecordDB {
    pub sync_id: String,
    pub channel_id: String,
    pub status: String,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub error_message: Option<String>,
    pub videos_synced: i32,
    pub api_calls_made: i32,
    pub duration_seconds: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<SyncRecordDB> for SyncRecord {
    fn from(db: SyncRecordDB) -> Self {
        Self {
            sync_id: db.sync_id,
            channel_id: db.channel_id,
            status: serde_json::from_str(&format!("\"{}\"", db.status))
                .unwrap_or(SyncStatus::Running),
            started_at: parse_timestamp(&db.started_at),
            completed_at: db.completed_at.as_deref().map(parse_timestamp),
            error_message: db.error_message,
            videos_synced: db.videos_synced,
            api_calls_made: db.api_calls_made,
            duration_seconds: db.duration_seconds,
            created_at: parse_timestamp(&db.created_at),
            updated_at: parse_timestamp(&db.updated_at),
        }
    }
}

impl From<SyncRecord> for SyncRecordDB {
    fn from(domain: SyncRecord) -> Self {
        Self {
            sync_id: domain.sync_id,
            channel_id: domain.channel_id,
            status: serde_json::to_string(&domain.status)
                .unwrap_or_default()
                .trim_matches('"')
                .to_string(),
            started_at: domain.started_at.to_rfc3339(),
            completed_at: domain.completed_at.map(|dt| dt.to_rfc3339()),
            error_message: domain.error_message,
            videos_synced: domain.videos_synced,
            api_calls_made: domain.api_calls_made,
            duration_seconds: domain.duration_seconds,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}
