//! Data freshness policy.
//!
//! Pure wall-clock decision over persisted sync records: a channel is stale
//! when its newest completed sync is at least `sync_frequency_hours` old, or
//! when it has never completed a sync.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::sync_config_model::SyncConfigurationRepositoryTrait;
use super::sync_record_model::{SyncRecord, SyncRecordRepositoryTrait};
use crate::constants::STALE_SOON_WINDOW_HOURS;
use crate::errors::Result;

/// Freshness judgment for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreshnessRecommendation {
    Fresh,
    /// Within four hours of the staleness threshold.
    StaleSoon,
    Stale,
}

/// Condensed view of the last completed sync, embedded in freshness reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSyncSummary {
    pub sync_id: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub videos_synced: i32,
    pub api_calls_made: i32,
}

impl From<&SyncRecord> for LastSyncSummary {
    fn from(record: &SyncRecord) -> Self {
        Self {
            sync_id: record.sync_id.clone(),
            completed_at: record.completed_at,
            videos_synced: record.videos_synced,
            api_calls_made: record.api_calls_made,
        }
    }
}

/// Freshness report for a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFreshness {
    /// Hours since the last completed sync; `None` when no sync has ever run.
    pub data_age_hours: Option<f64>,
    pub is_stale: bool,
    pub recommendation: FreshnessRecommendation,
    /// Human-readable form of the recommendation.
    pub message: String,
    pub last_sync: Option<LastSyncSummary>,
}

/// Decides whether a channel's locally stored data is stale.
#[derive(Clone)]
pub struct FreshnessPolicy {
    record_repository: Arc<dyn SyncRecordRepositoryTrait>,
    config_repository: Arc<dyn SyncConfigurationRepositoryTrait>,
}

impl FreshnessPolicy {
    pub fn new(
        record_repository: Arc<dyn SyncRecordRepositoryTrait>,
        config_repository: Arc<dyn SyncConfigurationRepositoryTrait>,
    ) -> Self {
        Self {
            record_repository,
            config_repository,
        }
    }

    /// Whether the channel's data is stale right now.
    pub async fn is_stale(&self, channel_id: &str) -> Result<bool> {
        let config = self.config_repository.get_or_create(channel_id).await?;
        let last_completed = self.record_repository.get_latest_completed(channel_id)?;
        Ok(is_stale_at(
            last_completed.as_ref().and_then(|r| r.completed_at),
            config.sync_frequency_hours,
            Utc::now(),
        ))
    }

    /// Full freshness report for a channel.
    pub async fn assess(&self, channel_id: &str) -> Result<DataFreshness> {
        let config = self.config_repository.get_or_create(channel_id).await?;
        let last_completed = self.record_repository.get_latest_completed(channel_id)?;
        let now = Utc::now();
        let completed_at = last_completed.as_ref().and_then(|r| r.completed_at);

        let recommendation = evaluate(completed_at, config.sync_frequency_hours, now);
        let message = match (&last_completed, recommendation) {
            (None, _) => "No sync found - initial sync required".to_string(),
            (Some(_), FreshnessRecommendation::Fresh) => "Data is fresh".to_string(),
            (Some(_), FreshnessRecommendation::StaleSoon) => {
                "Data will be stale soon - sync will run automatically".to_string()
            }
            (Some(_), FreshnessRecommendation::Stale) => {
                "Data is stale - sync recommended".to_string()
            }
        };

        Ok(DataFreshness {
            data_age_hours: data_age_hours(completed_at, now),
            is_stale: is_stale_at(completed_at, config.sync_frequency_hours, now),
            recommendation,
            message,
            last_sync: last_completed.as_ref().map(LastSyncSummary::from),
        })
    }
}

/// Hours elapsed since `completed_at`, at a fixed `now`.
pub fn data_age_hours(
    completed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<f64> {
    completed_at.map(|at| (now - at).num_seconds() as f64 / 3600.0)
}

/// Staleness at a fixed `now`: no completed sync, or age >= frequency.
pub fn is_stale_at(
    completed_at: Option<DateTime<Utc>>,
    frequency_hours: i32,
    now: DateTime<Utc>,
) -> bool {
    match completed_at {
        None => true,
        Some(at) => now - at >= Duration::hours(frequency_hours as i64),
    }
}

/// Three-way judgment at a fixed `now`.
pub fn evaluate(
    completed_at: Option<DateTime<Utc>>,
    frequency_hours: i32,
    now: DateTime<Utc>,
) -> FreshnessRecommendation {
    let Some(at) = completed_at else {
        return FreshnessRecommendation::Stale;
    };
    let age = now - at;
    let threshold = Duration::hours(frequency_hours as i64);
    if age >= threshold {
        FreshnessRecommendation::Stale
    } else if threshold - age <= Duration::hours(STALE_SOON_WINDOW_HOURS) {
        FreshnessRecommendation::StaleSoon
    } else {
        FreshnessRecommendation::Fresh
    }
}
