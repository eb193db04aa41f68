//! Shared constants for the sync engine.

/// Default refresh interval for a channel, in hours.
pub const DEFAULT_SYNC_FREQUENCY_HOURS: i32 = 24;

/// Default number of retries kept on the configuration row.
/// No retry loop consumes this yet.
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Default delay between retries, in minutes (see `DEFAULT_MAX_RETRIES`).
pub const DEFAULT_RETRY_DELAY_MINUTES: i32 = 30;

/// Default daily data-API quota budget, in quota units.
pub const DEFAULT_DAILY_QUOTA_LIMIT: i32 = 10_000;

/// Default number of days historical snapshots are kept before the
/// retention sweep may remove them.
pub const DEFAULT_KEEP_SNAPSHOT_DAYS: i32 = 90;

/// Fixed API-call estimate charged for one daily-metrics collection pass.
/// The collector does not expose its true call count.
pub const METRICS_COLLECTION_CALL_ESTIMATE: i32 = 10;

/// Page size assumed when estimating API calls for a full video listing.
pub const VIDEO_LIST_PAGE_SIZE: usize = 50;

/// Window before the staleness threshold in which data is reported as
/// "stale soon", in hours.
pub const STALE_SOON_WINDOW_HOURS: i64 = 4;

/// Seconds between scheduler ticks.
pub const SCHEDULER_TICK_INTERVAL_SECS: u64 = 3600;

/// Seconds the scheduler waits after a failed tick before resuming.
pub const SCHEDULER_ERROR_BACKOFF_SECS: u64 = 300;
