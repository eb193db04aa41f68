//! Repository for sync metrics. Append-only.

use async_trait::async_trait;
use diesel::prelude::*;

use creatorpulse_core::errors::Result;
use creatorpulse_core::sync::{SyncMetrics, SyncMetricsRepositoryTrait};

use crate::db::WriteHandle;
use crate::errors::StorageError;
use crate::schema::sync_metrics;

use super::model::SyncMetricsDB;

pub struct SyncMetricsRepository {
    writer: WriteHandle,
}

impl SyncMetricsRepository {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl SyncMetricsRepositoryTrait for SyncMetricsRepository {
    async fn record(&self, metrics: SyncMetrics) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let db_model: SyncMetricsDB = metrics.into();

                diesel::insert_into(sync_metrics::table)
                    .values(&db_model)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(())
            })
            .await
    }
}
