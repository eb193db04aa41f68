//! Sync attempt records and their state machine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::Result;

/// Status of a sync attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    /// Reserved for future queueing. New records go straight to `Running`.
    Pending,
    /// Attempt is in flight.
    #[default]
    Running,
    /// Terminal: pipeline finished successfully.
    Completed,
    /// Terminal: pipeline raised an error.
    Failed,
    /// Terminal: a trigger reported "sync not needed" instead of starting work.
    Cancelled,
}

impl SyncStatus {
    /// Whether a record in this status is immutable.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SyncStatus::Completed | SyncStatus::Failed | SyncStatus::Cancelled
        )
    }
}

/// Sync-specific error conditions.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Concurrency conflict: a running record already exists for the channel.
    #[error("Sync already running for channel {channel_id}")]
    AlreadyRunning { channel_id: String },

    /// Syncing is disabled for the channel.
    #[error("Sync is disabled for channel {channel_id}")]
    Disabled { channel_id: String },

    /// No record with the given sync id exists.
    #[error("Sync record {sync_id} not found")]
    RecordNotFound { sync_id: String },
}

/// One sync attempt for a channel.
///
/// Created when an attempt begins, mutated only by the coordinator that owns
/// it, immutable once terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    /// Globally unique attempt identifier.
    pub sync_id: String,
    /// Channel being synchronized.
    pub channel_id: String,
    /// Current state-machine status.
    pub status: SyncStatus,
    /// When the attempt started.
    pub started_at: DateTime<Utc>,
    /// When the attempt reached a terminal state.
    pub completed_at: Option<DateTime<Utc>>,
    /// Captured error if the attempt failed.
    pub error_message: Option<String>,
    /// Videos successfully upserted during the attempt.
    pub videos_synced: i32,
    /// Estimated data-API calls made, including partial counts on failure.
    pub api_calls_made: i32,
    /// Wall-clock duration of the attempt.
    pub duration_seconds: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SyncRecord {
    /// Create a new attempt record in `Running`.
    pub fn new(channel_id: String) -> Self {
        let now = Utc::now();
        Self {
            sync_id: uuid::Uuid::new_v4().to_string(),
            channel_id,
            status: SyncStatus::Running,
            started_at: now,
            completed_at: None,
            error_message: None,
            videos_synced: 0,
            api_calls_made: 0,
            duration_seconds: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to `Completed`. Ignored if the record is already terminal.
    pub fn complete(&mut self, videos_synced: i32, api_calls_made: i32, duration_seconds: f64) {
        if self.status.is_terminal() {
            return;
        }
        self.status = SyncStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.videos_synced = videos_synced;
        self.api_calls_made = api_calls_made;
        self.duration_seconds = Some(duration_seconds);
        self.updated_at = Utc::now();
    }

    /// Transition to `Failed`. Ignored if the record is already terminal.
    pub fn fail(&mut self, error: String, api_calls_made: i32, duration_seconds: f64) {
        if self.status.is_terminal() {
            return;
        }
        self.status = SyncStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.error_message = Some(error);
        self.api_calls_made = api_calls_made;
        self.duration_seconds = Some(duration_seconds);
        self.updated_at = Utc::now();
    }
}

/// Point-in-time sync status for a channel, assembled for status queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusReport {
    pub channel_id: String,
    /// Currently running attempt, if any.
    pub current_sync: Option<SyncRecord>,
    /// Most recent completed attempt, if any.
    pub last_successful_sync: Option<SyncRecord>,
    /// When the next scheduled sync would run.
    pub next_scheduled_sync: DateTime<Utc>,
    pub sync_frequency_hours: i32,
    /// Hours since the last completed sync.
    pub data_freshness_hours: Option<f64>,
    pub is_sync_needed: bool,
}

/// Trait for sync record persistence operations.
#[async_trait]
pub trait SyncRecordRepositoryTrait: Send + Sync {
    /// Create a record in `Running`, enforcing the single-flight guard.
    ///
    /// Fails with [`SyncError::AlreadyRunning`] when a running record exists
    /// for the same channel, unless `force` is set — a forced start skips the
    /// guard entirely and a second running record is created on purpose
    /// (manual-override tolerance).
    ///
    /// Implementations must perform the guard check and the insert atomically
    /// (one transaction) so two concurrent starts cannot both pass the check.
    async fn create_running(&self, record: SyncRecord, force: bool) -> Result<SyncRecord>;

    /// Persist new field values for an existing record.
    async fn update(&self, record: SyncRecord) -> Result<SyncRecord>;

    /// Get a record by sync id.
    fn get_by_id(&self, sync_id: &str) -> Result<Option<SyncRecord>>;

    /// All records currently in `Running` for a channel.
    fn get_running_for_channel(&self, channel_id: &str) -> Result<Vec<SyncRecord>>;

    /// Most recent `Completed` record for a channel, by `completed_at`.
    fn get_latest_completed(&self, channel_id: &str) -> Result<Option<SyncRecord>>;

    /// Recent attempts for a channel, newest first, optionally filtered by status.
    fn get_history(
        &self,
        channel_id: &str,
        status: Option<SyncStatus>,
        limit: i64,
    ) -> Result<Vec<SyncRecord>>;
}
