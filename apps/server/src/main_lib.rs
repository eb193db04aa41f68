//! Application state construction and tracing setup.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use creatorpulse_core::fetcher::{DailyMetricsCollector, HttpChannelDataFetcher};
use creatorpulse_core::sync::{
    SchedulerConfig, SchedulerService, SyncService, SyncServiceTrait,
};
use creatorpulse_storage_sqlite::channels::ChannelRepository;
use creatorpulse_storage_sqlite::sync::{
    ChannelSnapshotRepository, SyncConfigurationRepository, SyncMetricsRepository,
    SyncRecordRepository,
};
use creatorpulse_storage_sqlite::videos::VideoRepository;
use creatorpulse_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

use crate::config::Config;

pub struct AppState {
    pub sync_service: Arc<dyn SyncServiceTrait>,
    pub scheduler: Arc<SchedulerService>,
    pub default_channel_id: Option<String>,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,creatorpulse_core=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.app_data_dir)?;
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let record_repository = Arc::new(SyncRecordRepository::new(pool.clone(), writer.clone()));
    let config_repository = Arc::new(SyncConfigurationRepository::new(
        pool.clone(),
        writer.clone(),
    ));
    let snapshot_repository = Arc::new(ChannelSnapshotRepository::new(
        pool.clone(),
        writer.clone(),
    ));
    let metrics_repository = Arc::new(SyncMetricsRepository::new(writer.clone()));
    let channel_repository = Arc::new(ChannelRepository::new(pool.clone(), writer.clone()));
    let video_repository = Arc::new(VideoRepository::new(pool.clone(), writer.clone()));

    let fetcher = Arc::new(HttpChannelDataFetcher::new(
        config.data_api_url.clone(),
        config.data_api_key.clone(),
    ));
    let metrics_collector = Arc::new(DailyMetricsCollector::new(fetcher.clone()));

    let sync_service: Arc<dyn SyncServiceTrait> = Arc::new(SyncService::new(
        record_repository,
        config_repository.clone(),
        snapshot_repository,
        metrics_repository,
        channel_repository,
        video_repository,
        fetcher,
        metrics_collector,
    ));

    let scheduler = Arc::new(SchedulerService::new(
        sync_service.clone(),
        config_repository,
        SchedulerConfig::default(),
    ));

    Ok(Arc::new(AppState {
        sync_service,
        scheduler,
        default_channel_id: config.default_channel_id.clone(),
    }))
}
