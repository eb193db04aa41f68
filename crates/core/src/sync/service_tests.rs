//! Coordinator and scheduler tests against in-memory repositories.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;

use super::*;
use crate::channels::{Channel, ChannelRepositoryTrait, UpsertOutcome, Video, VideoRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::fetcher::{
    ChannelDataFetcher, ChannelInfo, DailyMetricsSummary, FetchError, MetricsCollector, VideoInfo,
};

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Default)]
struct MemRecordRepository {
    records: Mutex<Vec<SyncRecord>>,
}

impl MemRecordRepository {
    fn seed(&self, record: SyncRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn all_for_channel(&self, channel_id: &str) -> Vec<SyncRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.channel_id == channel_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SyncRecordRepositoryTrait for MemRecordRepository {
    async fn create_running(&self, record: SyncRecord, force: bool) -> Result<SyncRecord> {
        let mut records = self.records.lock().unwrap();
        if !force
            && records
                .iter()
                .any(|r| r.channel_id == record.channel_id && r.status == SyncStatus::Running)
        {
            return Err(SyncError::AlreadyRunning {
                channel_id: record.channel_id.clone(),
            }
            .into());
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: SyncRecord) -> Result<SyncRecord> {
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| r.sync_id == record.sync_id)
            .ok_or_else(|| SyncError::RecordNotFound {
                sync_id: record.sync_id.clone(),
            })?;
        if !existing.status.is_terminal() {
            *existing = record.clone();
        }
        Ok(record)
    }

    fn get_by_id(&self, sync_id: &str) -> Result<Option<SyncRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.sync_id == sync_id)
            .cloned())
    }

    fn get_running_for_channel(&self, channel_id: &str) -> Result<Vec<SyncRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.channel_id == channel_id && r.status == SyncStatus::Running)
            .cloned()
            .collect())
    }

    fn get_latest_completed(&self, channel_id: &str) -> Result<Option<SyncRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.channel_id == channel_id && r.status == SyncStatus::Completed)
            .max_by_key(|r| r.completed_at)
            .cloned())
    }

    fn get_history(
        &self,
        channel_id: &str,
        status: Option<SyncStatus>,
        limit: i64,
    ) -> Result<Vec<SyncRecord>> {
        let mut records: Vec<SyncRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.channel_id == channel_id)
            .filter(|r| status.map(|s| r.status == s).unwrap_or(true))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        records.truncate(limit as usize);
        Ok(records)
    }
}

#[derive(Default)]
struct MemConfigRepository {
    configs: Mutex<HashMap<String, SyncConfiguration>>,
}

impl MemConfigRepository {
    fn seed(&self, config: SyncConfiguration) {
        self.configs
            .lock()
            .unwrap()
            .insert(config.channel_id.clone(), config);
    }
}

#[async_trait]
impl SyncConfigurationRepositoryTrait for MemConfigRepository {
    async fn get_or_create(&self, channel_id: &str) -> Result<SyncConfiguration> {
        let mut configs = self.configs.lock().unwrap();
        Ok(configs
            .entry(channel_id.to_string())
            .or_insert_with(|| SyncConfiguration::new_default(channel_id.to_string()))
            .clone())
    }

    fn list_enabled(&self) -> Result<Vec<SyncConfiguration>> {
        Ok(self
            .configs
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.sync_enabled)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        channel_id: &str,
        update: SyncConfigurationUpdate,
    ) -> Result<SyncConfiguration> {
        let mut configs = self.configs.lock().unwrap();
        let config = configs
            .entry(channel_id.to_string())
            .or_insert_with(|| SyncConfiguration::new_default(channel_id.to_string()));
        config.apply(update);
        Ok(config.clone())
    }
}

#[derive(Default)]
struct MemSnapshotRepository {
    snapshots: Mutex<Vec<ChannelSnapshot>>,
}

#[async_trait]
impl ChannelSnapshotRepositoryTrait for MemSnapshotRepository {
    async fn create(&self, snapshot: ChannelSnapshot) -> Result<ChannelSnapshot> {
        self.snapshots.lock().unwrap().push(snapshot.clone());
        Ok(snapshot)
    }

    fn get_by_sync_id(&self, sync_id: &str) -> Result<Option<ChannelSnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.sync_id == sync_id)
            .cloned())
    }

    fn get_latest_for_channel(&self, channel_id: &str) -> Result<Option<ChannelSnapshot>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .max_by_key(|s| s.sync_timestamp)
            .cloned())
    }

    async fn delete_older_than(&self, cutoff: chrono::DateTime<Utc>) -> Result<usize> {
        let mut snapshots = self.snapshots.lock().unwrap();
        let before = snapshots.len();
        snapshots.retain(|s| s.sync_timestamp >= cutoff);
        Ok(before - snapshots.len())
    }
}

#[derive(Default)]
struct MemMetricsRepository {
    rows: Mutex<Vec<SyncMetrics>>,
    fail_writes: bool,
}

#[async_trait]
impl SyncMetricsRepositoryTrait for MemMetricsRepository {
    async fn record(&self, metrics: SyncMetrics) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "metrics table unavailable".to_string(),
            )));
        }
        self.rows.lock().unwrap().push(metrics);
        Ok(())
    }
}

#[derive(Default)]
struct MemChannelRepository {
    channels: Mutex<HashMap<String, Channel>>,
}

#[async_trait]
impl ChannelRepositoryTrait for MemChannelRepository {
    async fn upsert(&self, channel: Channel) -> Result<UpsertOutcome> {
        let mut channels = self.channels.lock().unwrap();
        let outcome = if channels.contains_key(&channel.channel_id) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        };
        channels.insert(channel.channel_id.clone(), channel);
        Ok(outcome)
    }

    fn get_by_id(&self, channel_id: &str) -> Result<Option<Channel>> {
        Ok(self.channels.lock().unwrap().get(channel_id).cloned())
    }
}

#[derive(Default)]
struct MemVideoRepository {
    videos: Mutex<HashMap<String, Video>>,
    fail_ids: Vec<String>,
}

#[async_trait]
impl VideoRepositoryTrait for MemVideoRepository {
    async fn upsert(&self, video: Video) -> Result<UpsertOutcome> {
        if self.fail_ids.contains(&video.video_id) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        let mut videos = self.videos.lock().unwrap();
        let outcome = if videos.contains_key(&video.video_id) {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        };
        videos.insert(video.video_id.clone(), video);
        Ok(outcome)
    }

    fn get_by_id(&self, video_id: &str) -> Result<Option<Video>> {
        Ok(self.videos.lock().unwrap().get(video_id).cloned())
    }

    fn list_for_channel(&self, channel_id: &str) -> Result<Vec<Video>> {
        Ok(self
            .videos
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.channel_id == channel_id)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Stub external collaborators
// ============================================================================

struct StubFetcher {
    videos: Vec<VideoInfo>,
    fail_listing: Option<FetchError>,
}

fn stub_video(id: &str) -> VideoInfo {
    VideoInfo {
        video_id: id.to_string(),
        title: format!("Video {}", id),
        description: None,
        published_at: None,
        view_count: 100,
        like_count: 10,
        comment_count: 1,
        duration_seconds: Some(120),
        thumbnail_url: None,
    }
}

fn stub_videos(count: usize) -> Vec<VideoInfo> {
    (1..=count).map(|i| stub_video(&format!("v{}", i))).collect()
}

#[async_trait]
impl ChannelDataFetcher for StubFetcher {
    async fn fetch_channel_info(&self, channel_id: &str) -> Result<ChannelInfo> {
        Ok(ChannelInfo {
            channel_id: channel_id.to_string(),
            title: "Test Channel".to_string(),
            description: None,
            subscriber_count: 5000,
            view_count: 1_000_000,
            video_count: self.videos.len() as i32,
        })
    }

    async fn fetch_all_videos(&self, _channel_id: &str) -> Result<Vec<VideoInfo>> {
        match &self.fail_listing {
            Some(FetchError::RateLimited) => Err(FetchError::RateLimited.into()),
            Some(FetchError::Timeout) => Err(FetchError::Timeout.into()),
            Some(_) => Err(FetchError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            }
            .into()),
            None => Ok(self.videos.clone()),
        }
    }

    async fn fetch_recent_videos(&self, _channel_id: &str, max: usize) -> Result<Vec<VideoInfo>> {
        let mut videos = self.videos.clone();
        videos.truncate(max);
        Ok(videos)
    }
}

/// Collector that blocks until released, keeping the attempt observable in
/// `Running`. Construct released for tests that do not need the gate.
struct GatedCollector {
    release: watch::Receiver<bool>,
}

#[async_trait]
impl MetricsCollector for GatedCollector {
    async fn collect_daily_metrics(&self, _channel_id: &str) -> Result<DailyMetricsSummary> {
        let mut release = self.release.clone();
        while !*release.borrow() {
            if release.changed().await.is_err() {
                break;
            }
        }
        Ok(DailyMetricsSummary {
            videos_processed: 0,
        })
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    service: SyncService,
    records: Arc<MemRecordRepository>,
    configs: Arc<MemConfigRepository>,
    snapshots: Arc<MemSnapshotRepository>,
    metrics: Arc<MemMetricsRepository>,
    release: watch::Sender<bool>,
}

struct HarnessOptions {
    videos: Vec<VideoInfo>,
    fail_listing: Option<FetchError>,
    failing_video_ids: Vec<String>,
    fail_metrics_writes: bool,
    gated: bool,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            videos: stub_videos(3),
            fail_listing: None,
            failing_video_ids: Vec::new(),
            fail_metrics_writes: false,
            gated: false,
        }
    }
}

fn harness(options: HarnessOptions) -> Harness {
    let records = Arc::new(MemRecordRepository::default());
    let configs = Arc::new(MemConfigRepository::default());
    let snapshots = Arc::new(MemSnapshotRepository::default());
    let metrics = Arc::new(MemMetricsRepository {
        rows: Mutex::new(Vec::new()),
        fail_writes: options.fail_metrics_writes,
    });
    let channels = Arc::new(MemChannelRepository::default());
    let videos = Arc::new(MemVideoRepository {
        videos: Mutex::new(HashMap::new()),
        fail_ids: options.failing_video_ids,
    });
    let fetcher = Arc::new(StubFetcher {
        videos: options.videos,
        fail_listing: options.fail_listing,
    });
    let (release, release_rx) = watch::channel(!options.gated);
    let collector = Arc::new(GatedCollector {
        release: release_rx,
    });

    let service = SyncService::new(
        records.clone(),
        configs.clone(),
        snapshots.clone(),
        metrics.clone(),
        channels,
        videos,
        fetcher,
        collector,
    );

    Harness {
        service,
        records,
        configs,
        snapshots,
        metrics,
        release,
    }
}

/// Poll until the record reaches a terminal status.
async fn wait_for_terminal(records: &MemRecordRepository, sync_id: &str) -> SyncRecord {
    for _ in 0..200 {
        if let Some(record) = records.get_by_id(sync_id).unwrap() {
            if record.status.is_terminal() {
                return record;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("sync {} did not reach a terminal status", sync_id);
}

/// Poll until the metrics row for an attempt lands (it is written after the
/// terminal transition).
async fn wait_for_metrics(metrics: &MemMetricsRepository, sync_id: &str) -> SyncMetrics {
    for _ in 0..200 {
        let row = metrics
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.sync_id == sync_id)
            .cloned();
        if let Some(row) = row {
            return row;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("metrics for sync {} were not recorded", sync_id);
}

fn completed_record(channel_id: &str, hours_ago: i64) -> SyncRecord {
    let mut record = SyncRecord::new(channel_id.to_string());
    record.complete(10, 5, 1.0);
    let completed_at = Utc::now() - chrono::Duration::hours(hours_ago);
    record.started_at = completed_at - chrono::Duration::minutes(5);
    record.completed_at = Some(completed_at);
    record
}

// ============================================================================
// Coordinator tests
// ============================================================================

#[tokio::test]
async fn test_initial_sync_is_needed_and_starts_running() {
    let h = harness(HarnessOptions {
        gated: true,
        ..Default::default()
    });

    // No prior record: an initial sync is required.
    assert!(h.service.check_sync_needed("C1").await.unwrap());

    let sync_id = h.service.start_sync("C1", false, "test").await.unwrap();
    assert!(!sync_id.is_empty());

    // Exactly one record for the channel, and it is running.
    let records = h.records.all_for_channel("C1");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sync_id, sync_id);
    assert_eq!(records[0].status, SyncStatus::Running);

    // Release the pipeline and let it finish.
    h.release.send(true).unwrap();
    let record = wait_for_terminal(&h.records, &sync_id).await;
    assert_eq!(record.status, SyncStatus::Completed);
}

#[tokio::test]
async fn test_concurrent_start_rejected_unless_forced() {
    let h = harness(HarnessOptions {
        gated: true,
        ..Default::default()
    });

    let first = h.service.start_sync("C1", false, "test").await.unwrap();

    // Second unforced start hits the single-flight guard.
    let err = h.service.start_sync("C1", false, "test").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Sync(SyncError::AlreadyRunning { .. })
    ));

    // Forced start bypasses the guard: two running records now exist.
    let third = h.service.start_sync("C1", true, "test").await.unwrap();
    assert_ne!(first, third);
    assert_eq!(h.records.get_running_for_channel("C1").unwrap().len(), 2);

    h.release.send(true).unwrap();
    wait_for_terminal(&h.records, &first).await;
    wait_for_terminal(&h.records, &third).await;
}

#[tokio::test]
async fn test_fetch_failure_fails_attempt_without_snapshot() {
    let h = harness(HarnessOptions {
        fail_listing: Some(FetchError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        }),
        ..Default::default()
    });

    let sync_id = h.service.start_sync("C1", false, "test").await.unwrap();
    let record = wait_for_terminal(&h.records, &sync_id).await;

    assert_eq!(record.status, SyncStatus::Failed);
    assert!(!record.error_message.clone().unwrap().is_empty());
    // Metrics-collection estimate was already charged before the failure.
    assert_eq!(record.api_calls_made, 10);

    // No snapshot was written for the failed attempt.
    assert!(h.snapshots.get_by_sync_id(&sync_id).unwrap().is_none());

    // The metrics row still lands and classifies the failure.
    let row = wait_for_metrics(&h.metrics, &sync_id).await;
    assert_eq!(row.api_errors, 1);
}

#[tokio::test]
async fn test_rate_limit_and_timeout_classification() {
    for (fail, check) in [
        (
            FetchError::RateLimited,
            Box::new(|m: &SyncMetrics| m.rate_limit_hits == 1) as Box<dyn Fn(&SyncMetrics) -> bool>,
        ),
        (
            FetchError::Timeout,
            Box::new(|m: &SyncMetrics| m.timeout_errors == 1),
        ),
    ] {
        let h = harness(HarnessOptions {
            fail_listing: Some(fail),
            ..Default::default()
        });
        let sync_id = h.service.start_sync("C1", false, "test").await.unwrap();
        let record = wait_for_terminal(&h.records, &sync_id).await;
        assert_eq!(record.status, SyncStatus::Failed);
        let row = wait_for_metrics(&h.metrics, &sync_id).await;
        assert!(check(&row));
    }
}

#[tokio::test]
async fn test_partial_upsert_failure_does_not_fail_attempt() {
    let h = harness(HarnessOptions {
        videos: stub_videos(10),
        failing_video_ids: vec!["v7".to_string()],
        ..Default::default()
    });

    let sync_id = h.service.start_sync("C1", false, "test").await.unwrap();
    let record = wait_for_terminal(&h.records, &sync_id).await;

    assert_eq!(record.status, SyncStatus::Completed);
    assert_eq!(record.videos_synced, 9);
    assert!(record.error_message.is_none());

    let row = wait_for_metrics(&h.metrics, &sync_id).await;
    assert_eq!(row.upsert_errors, 1);
    assert_eq!(row.videos_processed, 9);
}

#[tokio::test]
async fn test_metrics_write_failure_is_swallowed() {
    let h = harness(HarnessOptions {
        fail_metrics_writes: true,
        ..Default::default()
    });

    let sync_id = h.service.start_sync("C1", false, "test").await.unwrap();
    let record = wait_for_terminal(&h.records, &sync_id).await;

    // The attempt's terminal status is unaffected by the metrics failure.
    assert_eq!(record.status, SyncStatus::Completed);
}

#[tokio::test]
async fn test_check_sync_needed_respects_configuration_and_freshness() {
    let h = harness(HarnessOptions::default());

    // Disabled configuration short-circuits to "not needed".
    let mut disabled = SyncConfiguration::new_default("C-off".to_string());
    disabled.sync_enabled = false;
    h.configs.seed(disabled);
    assert!(!h.service.check_sync_needed("C-off").await.unwrap());

    // Fresh data (23h old with 24h frequency) is not due; 25h old is.
    h.records.seed(completed_record("C-fresh", 23));
    assert!(!h.service.check_sync_needed("C-fresh").await.unwrap());

    h.records.seed(completed_record("C-stale", 25));
    assert!(h.service.check_sync_needed("C-stale").await.unwrap());
}

#[tokio::test]
async fn test_trigger_skips_when_not_needed() {
    let h = harness(HarnessOptions::default());
    h.records.seed(completed_record("C1", 1));

    let outcome = h.service.trigger_sync("C1", false, "manual").await.unwrap();
    assert_eq!(outcome, SyncTriggerOutcome::NotNeeded);
    // Only the seeded record exists; no attempt was created.
    assert_eq!(h.records.all_for_channel("C1").len(), 1);

    // Forced trigger starts regardless of freshness.
    let outcome = h.service.trigger_sync("C1", true, "manual").await.unwrap();
    let SyncTriggerOutcome::Started { sync_id } = outcome else {
        panic!("expected a started sync");
    };
    wait_for_terminal(&h.records, &sync_id).await;
}

#[tokio::test]
async fn test_configuration_read_is_idempotent() {
    let h = harness(HarnessOptions::default());

    let first = h.service.get_configuration("C1").await.unwrap();
    let second = h.service.get_configuration("C1").await.unwrap();

    // The lazy-create path must not re-create on second read.
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_sync_status_report() {
    let h = harness(HarnessOptions::default());
    h.records.seed(completed_record("C1", 23));

    let report = h.service.get_sync_status("C1").await.unwrap();

    assert_eq!(report.channel_id, "C1");
    assert!(report.current_sync.is_none());
    assert!(report.last_successful_sync.is_some());
    assert_eq!(report.sync_frequency_hours, 24);
    assert!(!report.is_sync_needed);
    let age = report.data_freshness_hours.unwrap();
    assert!(age > 22.9 && age < 23.1);
}

#[tokio::test]
async fn test_data_freshness_report_messages() {
    let h = harness(HarnessOptions::default());

    // Never synced.
    let freshness = h.service.get_data_freshness("C-new").await.unwrap();
    assert!(freshness.is_stale);
    assert!(freshness.data_age_hours.is_none());
    assert_eq!(freshness.recommendation, FreshnessRecommendation::Stale);
    assert!(freshness.message.contains("initial sync required"));

    // Within the stale-soon window.
    h.records.seed(completed_record("C-soon", 21));
    let freshness = h.service.get_data_freshness("C-soon").await.unwrap();
    assert!(!freshness.is_stale);
    assert_eq!(freshness.recommendation, FreshnessRecommendation::StaleSoon);
    assert!(freshness.last_sync.is_some());
}

#[tokio::test]
async fn test_history_filtering() {
    let h = harness(HarnessOptions::default());
    h.records.seed(completed_record("C1", 30));
    let mut failed = SyncRecord::new("C1".to_string());
    failed.fail("boom".to_string(), 1, 0.5);
    h.records.seed(failed);

    let all = h.service.get_sync_history("C1", None, 10).unwrap();
    assert_eq!(all.len(), 2);

    let failures = h
        .service
        .get_sync_history("C1", Some(SyncStatus::Failed), 10)
        .unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].status, SyncStatus::Failed);
}

// ============================================================================
// Scheduler tests
// ============================================================================

fn scheduler_harness(options: HarnessOptions) -> (Arc<SchedulerService>, Harness) {
    let h = harness(options);
    let scheduler = Arc::new(SchedulerService::new(
        Arc::new(h.service.clone()),
        h.configs.clone(),
        SchedulerConfig {
            tick_interval: Duration::from_millis(20),
            error_backoff: Duration::from_millis(20),
        },
    ));
    (scheduler, h)
}

#[tokio::test]
async fn test_scheduler_dispatches_due_channels() {
    let (scheduler, h) = scheduler_harness(HarnessOptions::default());
    h.configs
        .seed(SyncConfiguration::new_default("C1".to_string()));

    scheduler.start();
    assert!(scheduler.status().running);

    // The first tick dispatches an initial sync for the enabled channel.
    for _ in 0..200 {
        if !h.records.all_for_channel("C1").is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let records = h.records.all_for_channel("C1");
    assert!(!records.is_empty());

    scheduler.stop();
    assert!(!scheduler.status().running);
}

#[tokio::test]
async fn test_scheduler_skips_disabled_and_fresh_channels() {
    let (scheduler, h) = scheduler_harness(HarnessOptions::default());

    let mut disabled = SyncConfiguration::new_default("C-off".to_string());
    disabled.sync_enabled = false;
    h.configs.seed(disabled);

    h.configs
        .seed(SyncConfiguration::new_default("C-fresh".to_string()));
    h.records.seed(completed_record("C-fresh", 1));

    scheduler.start();
    tokio::time::sleep(Duration::from_millis(100)).await;
    scheduler.stop();

    assert!(h.records.all_for_channel("C-off").is_empty());
    // Only the seeded completed record; nothing new dispatched.
    assert_eq!(h.records.all_for_channel("C-fresh").len(), 1);
}

#[tokio::test]
async fn test_scheduler_start_and_stop_are_idempotent() {
    let (scheduler, _h) = scheduler_harness(HarnessOptions::default());

    scheduler.start();
    scheduler.start();
    assert!(scheduler.status().running);

    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.status().running);
    assert!(scheduler.status().active_channels.is_empty());
}

#[tokio::test]
async fn test_scheduler_manual_trigger() {
    let (scheduler, h) = scheduler_harness(HarnessOptions::default());

    let sync_id = scheduler.trigger_manual_sync("C1", false).await.unwrap();
    let record = wait_for_terminal(&h.records, &sync_id).await;
    assert_eq!(record.status, SyncStatus::Completed);
}
