//! Sync module - the sync orchestration engine.
//!
//! Periodically refreshes externally-sourced channel/video data into local
//! storage, guarantees at most one in-flight synchronization per channel,
//! tracks every attempt as a durable state-machine record, and records
//! per-attempt performance telemetry.

mod freshness;
mod scheduler;
mod snapshot_model;
mod sync_config_model;
mod sync_metrics_model;
mod sync_record_model;
mod sync_service;
mod sync_traits;

#[cfg(test)]
mod service_tests;

// Re-export the public interface
pub use freshness::{DataFreshness, FreshnessPolicy, FreshnessRecommendation, LastSyncSummary};
pub use scheduler::{SchedulerConfig, SchedulerService, SchedulerStatus};
pub use snapshot_model::{ChannelSnapshot, ChannelSnapshotRepositoryTrait};
pub use sync_config_model::{
    SyncConfiguration, SyncConfigurationRepositoryTrait, SyncConfigurationUpdate,
};
pub use sync_metrics_model::{SyncMetrics, SyncMetricsRepositoryTrait};
pub use sync_record_model::{
    SyncError, SyncRecord, SyncRecordRepositoryTrait, SyncStatus, SyncStatusReport,
};
pub use sync_service::SyncService;
pub use sync_traits::{SyncServiceTrait, SyncTriggerOutcome};
