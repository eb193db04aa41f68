//! Database model for sync configurations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use creatorpulse_core::sync::SyncConfiguration;

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
#[diesel(table_name = crate::schema::sync_configurations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SyncConfigurationDB {
    pub id: String,
    pub channel_id: String,
    pub sync_enabled: bool,
    pub sync_frequency_hours: i32,
    pub max_retries: i32,
    pub retry_delay_minutes: i32,
    pub daily_quota_limit: i32,
    pub quota_reset_hour: i32,
    pub keep_snapshot_days: i32,
    pub notify_on_failure: bool,
    pub notification_email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<SyncConfigurationDB> for SyncConfiguration {
    fn from(db: SyncConfigurationDB) -> Self {
        Self {
            id: db.id,
            channel_id: db.channel_id,
            sync_enabled: db.sync_enabled,
            sync_frequency_hours: db.sync_frequency_hours,
            max_retries: db.max_retries,
            retry_delay_minutes: db.retry_delay_minutes,
            daily_quota_limit: db.daily_quota_limit,
            quota_reset_hour: db.quota_reset_hour,
            keep_snapshot_days: db.keep_snapshot_days,
            notify_on_failure: db.notify_on_failure,
            notification_email: db.notification_email,
            created_at: parse_timestamp(&db.created_at),
            updated_at: parse_timestamp(&db.updated_at),
        }
    }
}

impl From<SyncConfiguration> for SyncConfigurationDB {
    fn from(domain: SyncConfiguration) -> Self {
        Self {
            id: domain.id,
            channel_id: domain.channel_id,
            sync_enabled: domain.sync_enabled,
            sync_frequency_hours: domain.sync_frequency_hours,
            max_retries: domain.max_retries,
            retry_delay_minutes: domain.retry_delay_minutes,
            daily_quota_limit: domain.daily_quota_limit,
            quota_reset_hour: domain.quota_reset_hour,
            keep_snapshot_days: domain.keep_snapshot_days,
            notify_on_failure: domain.notify_on_failure,
            notification_email: domain.notification_email,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}
