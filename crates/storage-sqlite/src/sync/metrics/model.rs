//! Database model for sync metrics.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use creatorpulse_core::sync::SyncMetrics;

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
#[diesel(table_name = crate::schema::sync_metrics)]
#[diesel(primary_key(metric_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SyncMetricsDB {
    pub metric_id: String,
    pub sync_id: String,
    pub channel_id: String,
    pub total_duration_seconds: f64,
    pub api_calls_made: i32,
    pub videos_processed: i32,
    pub videos_added: i32,
    pub videos_updated: i32,
    pub videos_removed: i32,
    pub api_errors: i32,
    pub rate_limit_hits: i32,
    pub timeout_errors: i32,
    pub upsert_errors: i32,
    pub recorded_at: String,
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<SyncMetricsDB> for SyncMetrics {
    fn from(db: SyncMetricsDB) -> Self {
        Self {
            metric_id: db.metric_id,
            sync_id: db.sync_id,
            channel_id: db.channel_id,
            total_duration_seconds: db.total_duration_seconds,
            api_calls_made: db.api_calls_made,
            videos_processed: db.videos_processed,
            videos_added: db.videos_added,
            videos_updated: db.videos_updated,
            videos_removed: db.videos_removed,
            api_errors: db.api_errors,
            rate_limit_hits: db.rate_limit_hits,
            timeout_errors: db.timeout_errors,
            upsert_errors: db.upsert_errors,
            recorded_at: parse_timestamp(&db.recorded_at),
        }
    }
}

impl From<SyncMetrics> for SyncMetricsDB {
    fn from(domain: SyncMetrics) -> Self {
        Self {
            metric_id: domain.metric_id,
            sync_id: domain.sync_id,
            channel_id: domain.channel_id,
            total_duration_seconds: domain.total_duration_seconds,
            api_calls_made: domain.api_calls_made,
            videos_processed: domain.videos_processed,
            videos_added: domain.videos_added,
            videos_updated: domain.videos_updated,
            videos_removed: domain.videos_removed,
            api_errors: domain.api_errors,
            rate_limit_hits: domain.rate_limit_hits,
            timeout_errors: domain.timeout_errors,
            upsert_errors: domain.upsert_errors,
            recorded_at: domain.recorded_at.to_rfc3339(),
        }
    }
}
