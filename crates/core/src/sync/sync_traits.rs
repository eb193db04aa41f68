//! Service trait for the sync coordinator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::freshness::DataFreshness;
use super::sync_config_model::{SyncConfiguration, SyncConfigurationUpdate};
use super::sync_record_model::{SyncRecord, SyncStatus, SyncStatusReport};
use crate::errors::Result;

/// Outcome of a trigger request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "outcome")]
pub enum SyncTriggerOutcome {
    /// An attempt was started; poll its status with the sync id.
    Started { sync_id: String },
    /// Data is still fresh (or syncing is disabled) and the trigger was not
    /// forced. No record was created.
    NotNeeded,
}

/// Coordinator operations for sync attempts.
#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    /// Whether a sync is due: `false` when the configuration is disabled,
    /// otherwise the freshness policy decides.
    async fn check_sync_needed(&self, channel_id: &str) -> Result<bool>;

    /// Start one attempt. Enforces the single-flight guard, creates the
    /// running record, and executes the pipeline as a detached task. Returns
    /// the sync id immediately so callers can poll status.
    async fn start_sync(&self, channel_id: &str, force: bool, reason: &str) -> Result<String>;

    /// Trigger semantics for out-of-band callers: skips the attempt entirely
    /// when it is not needed and not forced.
    async fn trigger_sync(
        &self,
        channel_id: &str,
        force: bool,
        reason: &str,
    ) -> Result<SyncTriggerOutcome>;

    /// Point-in-time status for a channel.
    async fn get_sync_status(&self, channel_id: &str) -> Result<SyncStatusReport>;

    /// Recent attempts, newest first, optionally filtered by status.
    fn get_sync_history(
        &self,
        channel_id: &str,
        status: Option<SyncStatus>,
        limit: i64,
    ) -> Result<Vec<SyncRecord>>;

    /// Configuration for a channel, created with defaults on first read.
    async fn get_configuration(&self, channel_id: &str) -> Result<SyncConfiguration>;

    /// Apply a partial configuration update.
    async fn update_configuration(
        &self,
        channel_id: &str,
        update: SyncConfigurationUpdate,
    ) -> Result<SyncConfiguration>;

    /// Freshness report for a channel.
    async fn get_data_freshness(&self, channel_id: &str) -> Result<DataFreshness>;
}
