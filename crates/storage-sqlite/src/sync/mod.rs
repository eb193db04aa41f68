//! Repositories for the sync engine tables.

pub mod config;
pub mod metrics;
pub mod record;
pub mod snapshot;

pub use config::SyncConfigurationRepository;
pub use metrics::SyncMetricsRepository;
pub use record::SyncRecordRepository;
pub use snapshot::ChannelSnapshotRepository;
