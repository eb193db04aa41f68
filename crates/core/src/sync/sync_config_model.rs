//! Per-channel sync policy models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DAILY_QUOTA_LIMIT, DEFAULT_KEEP_SNAPSHOT_DAYS, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY_MINUTES, DEFAULT_SYNC_FREQUENCY_HOURS,
};
use crate::errors::Result;

/// Sync policy for one channel.
///
/// Created lazily on first read (`get_or_create`) and mutated only through
/// the configuration-update operation. The engine never deletes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfiguration {
    /// Unique identifier for the configuration row.
    pub id: String,
    /// Channel this policy applies to. At most one configuration per channel.
    pub channel_id: String,
    /// Whether scheduled syncs run for this channel.
    pub sync_enabled: bool,
    /// Refresh interval in hours.
    pub sync_frequency_hours: i32,
    /// Retry budget. Not consumed by the current control flow.
    pub max_retries: i32,
    /// Delay between retries in minutes. Not consumed by the current control flow.
    pub retry_delay_minutes: i32,
    /// Daily data-API quota budget in quota units.
    pub daily_quota_limit: i32,
    /// Hour of day (0-23) when the quota budget resets.
    pub quota_reset_hour: i32,
    /// How long historical snapshots are kept, in days.
    pub keep_snapshot_days: i32,
    /// Whether a failed sync should notify.
    pub notify_on_failure: bool,
    /// Notification target.
    pub notification_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SyncConfiguration {
    /// Create a default-enabled configuration for a channel.
    pub fn new_default(channel_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id,
            sync_enabled: true,
            sync_frequency_hours: DEFAULT_SYNC_FREQUENCY_HOURS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_minutes: DEFAULT_RETRY_DELAY_MINUTES,
            daily_quota_limit: DEFAULT_DAILY_QUOTA_LIMIT,
            quota_reset_hour: 0,
            keep_snapshot_days: DEFAULT_KEEP_SNAPSHOT_DAYS,
            notify_on_failure: true,
            notification_email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: SyncConfigurationUpdate) {
        if let Some(enabled) = update.sync_enabled {
            self.sync_enabled = enabled;
        }
        if let Some(hours) = update.sync_frequency_hours {
            self.sync_frequency_hours = hours;
        }
        if let Some(retries) = update.max_retries {
            self.max_retries = retries;
        }
        if let Some(delay) = update.retry_delay_minutes {
            self.retry_delay_minutes = delay;
        }
        if let Some(limit) = update.daily_quota_limit {
            self.daily_quota_limit = limit;
        }
        if let Some(hour) = update.quota_reset_hour {
            self.quota_reset_hour = hour;
        }
        if let Some(days) = update.keep_snapshot_days {
            self.keep_snapshot_days = days;
        }
        if let Some(notify) = update.notify_on_failure {
            self.notify_on_failure = notify;
        }
        if let Some(email) = update.notification_email {
            self.notification_email = email;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial-update payload for a channel's sync policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfigurationUpdate {
    pub sync_enabled: Option<bool>,
    pub sync_frequency_hours: Option<i32>,
    pub max_retries: Option<i32>,
    pub retry_delay_minutes: Option<i32>,
    pub daily_quota_limit: Option<i32>,
    pub quota_reset_hour: Option<i32>,
    pub keep_snapshot_days: Option<i32>,
    pub notify_on_failure: Option<bool>,
    /// `Some(None)` clears the address.
    #[serde(default, with = "double_option")]
    pub notification_email: Option<Option<String>>,
}

/// Serde helper distinguishing an absent field from an explicit null.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Some(Option::<T>::deserialize(deserializer)?))
    }
}

/// Trait for sync configuration persistence operations.
#[async_trait]
pub trait SyncConfigurationRepositoryTrait: Send + Sync {
    /// Get the configuration for a channel, creating a default-enabled one
    /// if none exists. Repeated reads return the same row.
    async fn get_or_create(&self, channel_id: &str) -> Result<SyncConfiguration>;

    /// List all configurations with syncing enabled.
    fn list_enabled(&self) -> Result<Vec<SyncConfiguration>>;

    /// Apply a partial update, creating the configuration first if needed.
    async fn update(
        &self,
        channel_id: &str,
        update: SyncConfigurationUpdate,
    ) -> Result<SyncConfiguration>;
}
