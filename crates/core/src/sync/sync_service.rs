//! Sync coordinator: owns one attempt start-to-finish.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{error, info, warn};

use super::freshness::{data_age_hours, DataFreshness, FreshnessPolicy};
use super::snapshot_model::{ChannelSnapshot, ChannelSnapshotRepositoryTrait};
use super::sync_config_model::{
    SyncConfiguration, SyncConfigurationRepositoryTrait, SyncConfigurationUpdate,
};
use super::sync_metrics_model::{SyncMetrics, SyncMetricsRepositoryTrait};
use super::sync_record_model::{
    SyncRecord, SyncRecordRepositoryTrait, SyncStatus, SyncStatusReport,
};
use super::sync_traits::{SyncServiceTrait, SyncTriggerOutcome};
use crate::channels::{
    Channel, ChannelRepositoryTrait, UpsertOutcome, Video, VideoRepositoryTrait,
};
use crate::constants::{METRICS_COLLECTION_CALL_ESTIMATE, VIDEO_LIST_PAGE_SIZE};
use crate::errors::{Error, Result};
use crate::fetcher::{ChannelDataFetcher, MetricsCollector};

/// Counters accumulated across one attempt. Partial values survive a failed
/// pipeline so the record and metrics row reflect work done before the error.
#[derive(Debug, Default, Clone)]
struct SyncCounters {
    api_calls_made: i32,
    videos_synced: i32,
    videos_added: i32,
    videos_updated: i32,
    api_errors: i32,
    rate_limit_hits: i32,
    timeout_errors: i32,
    upsert_errors: i32,
}

/// Coordinates sync attempts for channels.
///
/// All collaborators sit behind trait objects; the service is `Clone` so the
/// detached pipeline task can own its own handle.
#[derive(Clone)]
pub struct SyncService {
    record_repository: Arc<dyn SyncRecordRepositoryTrait>,
    config_repository: Arc<dyn SyncConfigurationRepositoryTrait>,
    snapshot_repository: Arc<dyn ChannelSnapshotRepositoryTrait>,
    metrics_repository: Arc<dyn SyncMetricsRepositoryTrait>,
    channel_repository: Arc<dyn ChannelRepositoryTrait>,
    video_repository: Arc<dyn VideoRepositoryTrait>,
    fetcher: Arc<dyn ChannelDataFetcher>,
    metrics_collector: Arc<dyn MetricsCollector>,
    freshness: FreshnessPolicy,
}

impl SyncService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        record_repository: Arc<dyn SyncRecordRepositoryTrait>,
        config_repository: Arc<dyn SyncConfigurationRepositoryTrait>,
        snapshot_repository: Arc<dyn ChannelSnapshotRepositoryTrait>,
        metrics_repository: Arc<dyn SyncMetricsRepositoryTrait>,
        channel_repository: Arc<dyn ChannelRepositoryTrait>,
        video_repository: Arc<dyn VideoRepositoryTrait>,
        fetcher: Arc<dyn ChannelDataFetcher>,
        metrics_collector: Arc<dyn MetricsCollector>,
    ) -> Self {
        let freshness = FreshnessPolicy::new(record_repository.clone(), config_repository.clone());
        Self {
            record_repository,
            config_repository,
            snapshot_repository,
            metrics_repository,
            channel_repository,
            video_repository,
            fetcher,
            metrics_collector,
            freshness,
        }
    }

    /// Execute one attempt to completion. Runs detached from the caller of
    /// `start_sync`; every exit path reaches a terminal transition and writes
    /// a metrics row.
    async fn perform_sync(&self, mut record: SyncRecord, reason: String) {
        let started = Instant::now();
        let sync_id = record.sync_id.clone();
        let channel_id = record.channel_id.clone();

        info!(
            "Starting sync {} for channel {}: {}",
            sync_id, channel_id, reason
        );

        let mut counters = SyncCounters::default();
        let outcome = self
            .run_pipeline(&channel_id, &sync_id, &mut counters)
            .await;
        let duration = started.elapsed().as_secs_f64();

        match outcome {
            Ok(()) => {
                record.complete(counters.videos_synced, counters.api_calls_made, duration);
                info!(
                    "Sync {} completed. Videos synced: {}, API calls: {}",
                    sync_id, counters.videos_synced, counters.api_calls_made
                );
            }
            Err(err) => {
                classify_failure(&err, &mut counters);
                record.fail(err.to_string(), counters.api_calls_made, duration);
                error!("Sync {} failed: {}", sync_id, err);
            }
        }

        if let Err(err) = self.record_repository.update(record).await {
            error!(
                "Failed to persist terminal state for sync {}: {}",
                sync_id, err
            );
        }

        self.record_sync_metrics(&sync_id, &channel_id, duration, &counters)
            .await;
    }

    /// The fetch -> snapshot -> upsert pipeline. Fetch and snapshot failures
    /// abort the attempt; per-item upsert failures are absorbed and counted.
    async fn run_pipeline(
        &self,
        channel_id: &str,
        sync_id: &str,
        counters: &mut SyncCounters,
    ) -> Result<()> {
        // Historical growth snapshot for the channel and its videos. The true
        // call count is not observable here, so a fixed estimate is charged.
        let summary = self.metrics_collector.collect_daily_metrics(channel_id).await?;
        counters.api_calls_made += METRICS_COLLECTION_CALL_ESTIMATE;
        info!(
            "Collected daily metrics for channel {}: {} videos processed",
            channel_id, summary.videos_processed
        );

        // Complete current video list, then channel statistics.
        let videos = self.fetcher.fetch_all_videos(channel_id).await?;
        counters.api_calls_made += (videos.len() / VIDEO_LIST_PAGE_SIZE) as i32 + 2;
        let channel_info = self.fetcher.fetch_channel_info(channel_id).await?;

        // Snapshot first: it captures exactly what was fetched, independent
        // of how the local tables fare below.
        let snapshot = ChannelSnapshot::from_fetch(sync_id, &channel_info, &videos)?;
        self.snapshot_repository.create(snapshot).await?;

        // Best-effort per item: one bad video must not abort the others.
        for info in &videos {
            let video = Video::from_info(info, channel_id);
            match self.video_repository.upsert(video).await {
                Ok(UpsertOutcome::Inserted) => {
                    counters.videos_added += 1;
                    counters.videos_synced += 1;
                }
                Ok(UpsertOutcome::Updated) => {
                    counters.videos_updated += 1;
                    counters.videos_synced += 1;
                }
                Err(err) => {
                    counters.upsert_errors += 1;
                    warn!("Failed to upsert video {}: {}", info.video_id, err);
                }
            }
        }

        if let Err(err) = self
            .channel_repository
            .upsert(Channel::from_info(&channel_info))
            .await
        {
            counters.upsert_errors += 1;
            warn!("Failed to upsert channel {}: {}", channel_id, err);
        }

        Ok(())
    }

    /// Append the metrics row. Failures here are logged and swallowed so
    /// observability never blocks the pipeline.
    async fn record_sync_metrics(
        &self,
        sync_id: &str,
        channel_id: &str,
        duration: f64,
        counters: &SyncCounters,
    ) {
        let mut metrics = SyncMetrics::new(sync_id, channel_id);
        metrics.total_duration_seconds = duration;
        metrics.api_calls_made = counters.api_calls_made;
        metrics.videos_processed = counters.videos_synced;
        metrics.videos_added = counters.videos_added;
        metrics.videos_updated = counters.videos_updated;
        metrics.api_errors = counters.api_errors;
        metrics.rate_limit_hits = counters.rate_limit_hits;
        metrics.timeout_errors = counters.timeout_errors;
        metrics.upsert_errors = counters.upsert_errors;

        if let Err(err) = self.metrics_repository.record(metrics).await {
            error!("Failed to record metrics for sync {}: {}", sync_id, err);
        }
    }
}

/// Bucket a pipeline failure into the matching metrics counter.
fn classify_failure(err: &Error, counters: &mut SyncCounters) {
    if let Error::Fetch(fetch_err) = err {
        if fetch_err.is_rate_limited() {
            counters.rate_limit_hits += 1;
        } else if fetch_err.is_timeout() {
            counters.timeout_errors += 1;
        } else {
            counters.api_errors += 1;
        }
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn check_sync_needed(&self, channel_id: &str) -> Result<bool> {
        let config = self.config_repository.get_or_create(channel_id).await?;
        if !config.sync_enabled {
            return Ok(false);
        }
        self.freshness.is_stale(channel_id).await
    }

    async fn start_sync(&self, channel_id: &str, force: bool, reason: &str) -> Result<String> {
        let record = SyncRecord::new(channel_id.to_string());
        let record = self.record_repository.create_running(record, force).await?;
        let sync_id = record.sync_id.clone();

        let service = self.clone();
        let reason = reason.to_string();
        tokio::spawn(async move {
            service.perform_sync(record, reason).await;
        });

        Ok(sync_id)
    }

    async fn trigger_sync(
        &self,
        channel_id: &str,
        force: bool,
        reason: &str,
    ) -> Result<SyncTriggerOutcome> {
        if !force && !self.check_sync_needed(channel_id).await? {
            return Ok(SyncTriggerOutcome::NotNeeded);
        }

        let sync_id = self.start_sync(channel_id, force, reason).await?;
        Ok(SyncTriggerOutcome::Started { sync_id })
    }

    async fn get_sync_status(&self, channel_id: &str) -> Result<SyncStatusReport> {
        let config = self.config_repository.get_or_create(channel_id).await?;
        let current_sync = self
            .record_repository
            .get_running_for_channel(channel_id)?
            .into_iter()
            .next();
        let last_successful_sync = self.record_repository.get_latest_completed(channel_id)?;

        let now = Utc::now();
        let frequency = Duration::hours(config.sync_frequency_hours as i64);
        let last_completed_at = last_successful_sync.as_ref().and_then(|r| r.completed_at);
        let next_scheduled_sync = last_completed_at
            .map(|at| at + frequency)
            .unwrap_or(now + frequency);

        let is_sync_needed = self.check_sync_needed(channel_id).await?;

        Ok(SyncStatusReport {
            channel_id: channel_id.to_string(),
            current_sync,
            last_successful_sync,
            next_scheduled_sync,
            sync_frequency_hours: config.sync_frequency_hours,
            data_freshness_hours: data_age_hours(last_completed_at, now),
            is_sync_needed,
        })
    }

    fn get_sync_history(
        &self,
        channel_id: &str,
        status: Option<SyncStatus>,
        limit: i64,
    ) -> Result<Vec<SyncRecord>> {
        self.record_repository.get_history(channel_id, status, limit)
    }

    async fn get_configuration(&self, channel_id: &str) -> Result<SyncConfiguration> {
        self.config_repository.get_or_create(channel_id).await
    }

    async fn update_configuration(
        &self,
        channel_id: &str,
        update: SyncConfigurationUpdate,
    ) -> Result<SyncConfiguration> {
        self.config_repository.update(channel_id, update).await
    }

    async fn get_data_freshness(&self, channel_id: &str) -> Result<DataFreshness> {
        self.freshness.assess(channel_id).await
    }
}
