//! Background scheduler for periodic channel syncs.
//!
//! One explicitly constructed, explicitly started/stopped loop. Each tick
//! discovers enabled channels and dispatches due syncs through the
//! coordinator. The in-memory task map only avoids redundant dispatches from
//! this process; the durable running-record guard is the correctness
//! mechanism.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::sync_config_model::SyncConfigurationRepositoryTrait;
use super::sync_traits::SyncServiceTrait;
use crate::constants::{SCHEDULER_ERROR_BACKOFF_SECS, SCHEDULER_TICK_INTERVAL_SECS};
use crate::errors::Result;

/// Loop timing. Overridable in tests; production uses the defaults.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Sleep between ticks.
    pub tick_interval: Duration,
    /// Sleep after a failed tick before resuming the normal cadence.
    pub error_backoff: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(SCHEDULER_TICK_INTERVAL_SECS),
            error_backoff: Duration::from_secs(SCHEDULER_ERROR_BACKOFF_SECS),
        }
    }
}

/// Scheduler state for status queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    pub running: bool,
    /// Channels with an outstanding locally-tracked dispatch.
    pub active_channels: Vec<String>,
}

/// Periodic sync dispatcher.
pub struct SchedulerService {
    sync_service: Arc<dyn SyncServiceTrait>,
    config_repository: Arc<dyn SyncConfigurationRepositoryTrait>,
    config: SchedulerConfig,
    running: AtomicBool,
    shutdown: Notify,
    tasks: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl SchedulerService {
    pub fn new(
        sync_service: Arc<dyn SyncServiceTrait>,
        config_repository: Arc<dyn SyncConfigurationRepositoryTrait>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            sync_service,
            config_repository,
            config,
            running: AtomicBool::new(false),
            shutdown: Notify::new(),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Start the scheduler loop. Idempotent.
    pub fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Scheduler is already running");
            return;
        }

        info!("Starting channel data sync scheduler...");
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            scheduler.run_loop().await;
        });
    }

    /// Stop the scheduler loop. The loop exits at its next suspension point;
    /// in-flight sync attempts run to completion.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        info!("Stopping channel data sync scheduler...");
        self.shutdown.notify_waiters();
        self.tasks.lock().unwrap().clear();
    }

    /// Manually trigger a sync for a channel, outside the tick cadence.
    pub async fn trigger_manual_sync(&self, channel_id: &str, force: bool) -> Result<String> {
        let sync_id = self
            .sync_service
            .start_sync(channel_id, force, "manual trigger")
            .await?;
        info!(
            "Manual sync triggered for channel {}, sync_id: {}",
            channel_id, sync_id
        );
        Ok(sync_id)
    }

    /// Current scheduler state.
    pub fn status(&self) -> SchedulerStatus {
        let tasks = self.tasks.lock().unwrap();
        let active_channels = tasks
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(channel_id, _)| channel_id.clone())
            .collect();
        SchedulerStatus {
            running: self.running.load(Ordering::SeqCst),
            active_channels,
        }
    }

    async fn run_loop(&self) {
        while self.running.load(Ordering::SeqCst) {
            let wait = match self.run_tick().await {
                Ok(dispatched) => {
                    debug!("Scheduler tick dispatched {} syncs", dispatched);
                    self.config.tick_interval
                }
                Err(err) => {
                    error!("Scheduler tick failed: {}", err);
                    self.config.error_backoff
                }
            };

            tokio::select! {
                _ = self.shutdown.notified() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        info!("Scheduler loop stopped");
    }

    /// One pass over all enabled channels. Per-channel errors are logged and
    /// do not abort the rest of the tick.
    async fn run_tick(&self) -> Result<usize> {
        let configs = self.config_repository.list_enabled()?;
        info!("Checking {} channels for sync requirements", configs.len());

        let mut dispatched = 0;
        for config in configs {
            let channel_id = config.channel_id;

            if self.has_outstanding_task(&channel_id) {
                debug!("Sync already dispatched for channel {}", channel_id);
                continue;
            }

            match self.sync_service.check_sync_needed(&channel_id).await {
                Ok(true) => {
                    self.dispatch(channel_id);
                    dispatched += 1;
                }
                Ok(false) => debug!("Sync not needed for channel {}", channel_id),
                Err(err) => {
                    error!("Error checking sync for channel {}: {}", channel_id, err)
                }
            }
        }

        Ok(dispatched)
    }

    /// Whether a dispatch for this channel is still outstanding. Prunes
    /// finished handles as a side effect.
    fn has_outstanding_task(&self, channel_id: &str) -> bool {
        let mut tasks = self.tasks.lock().unwrap();
        tasks.retain(|_, handle| !handle.is_finished());
        tasks.contains_key(channel_id)
    }

    fn dispatch(&self, channel_id: String) {
        info!("Starting scheduled sync for channel {}", channel_id);

        let service = self.sync_service.clone();
        let id = channel_id.clone();
        let handle = tokio::spawn(async move {
            match service.start_sync(&id, false, "scheduled").await {
                Ok(sync_id) => {
                    info!(
                        "Scheduled sync started for channel {}, sync_id: {}",
                        id, sync_id
                    );
                }
                Err(err) => {
                    error!("Error running scheduled sync for channel {}: {}", id, err);
                }
            }
        });

        self.tasks.lock().unwrap().insert(channel_id, handle);
    }
}
