//! Repository for sync record persistence.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use creatorpulse_core::errors::Result;
use creatorpulse_core::sync::{
    SyncError, SyncRecord, SyncRecordRepositoryTrait, SyncStatus,
};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::sync_records;

use super::model::SyncRecordDB;

/// Statuses a record can still be updated from.
const NON_TERMINAL_STATUSES: [&str; 2] = ["PENDING", "RUNNING"];

fn status_str(status: SyncStatus) -> String {
    serde_json::to_string(&status)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}

pub struct SyncRecordRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SyncRecordRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SyncRecordRepositoryTrait for SyncRecordRepository {
    /// Guard check and insert run in one writer transaction, so two
    /// concurrent starts cannot both pass the check.
    async fn create_running(&self, record: SyncRecord, force: bool) -> Result<SyncRecord> {
        self.writer
            .exec(move |conn| {
                if !force {
                    let running: i64 = sync_records::table
                        .filter(sync_records::channel_id.eq(&record.channel_id))
                        .filter(sync_records::status.eq(status_str(SyncStatus::Running)))
                        .count()
                        .get_result(conn)
                        .map_err(StorageError::from)?;

                    if running > 0 {
                        return Err(SyncError::AlreadyRunning {
                            channel_id: record.channel_id.clone(),
                        }
                        .into());
                    }
                }

                let db_model: SyncRecordDB = record.into();
                diesel::insert_into(sync_records::table)
                    .values(&db_model)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(db_model.into())
            })
            .await
    }

    /// Terminal rows are filtered out of the update target, so a record can
    /// never be mutated after completion.
    async fn update(&self, record: SyncRecord) -> Result<SyncRecord> {
        self.writer
            .exec(move |conn| {
                let db_model: SyncRecordDB = record.into();

                diesel::update(
                    sync_records::table
                        .find(&db_model.sync_id)
                        .filter(sync_records::status.eq_any(NON_TERMINAL_STATUSES)),
                )
                .set(&db_model)
                .execute(conn)
                .map_err(StorageError::from)?;

                Ok(db_model.into())
            })
            .await
    }

    fn get_by_id(&self, sync_id: &str) -> Result<Option<SyncRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let result = sync_records::table
            .find(sync_id)
            .first::<SyncRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Into::into))
    }

    fn get_running_for_channel(&self, channel_id: &str) -> Result<Vec<SyncRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let results = sync_records::table
            .filter(sync_records::channel_id.eq(channel_id))
            .filter(sync_records::status.eq(status_str(SyncStatus::Running)))
            .order(sync_records::started_at.desc())
            .load::<SyncRecordDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    fn get_latest_completed(&self, channel_id: &str) -> Result<Option<SyncRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let result = sync_records::table
            .filter(sync_records::channel_id.eq(channel_id))
            .filter(sync_records::status.eq(status_str(SyncStatus::Completed)))
            .order(sync_records::completed_at.desc())
            .first::<SyncRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Into::into))
    }

    fn get_history(
        &self,
        channel_id: &str,
        status: Option<SyncStatus>,
        limit: i64,
    ) -> Result<Vec<SyncRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = sync_records::table
            .filter(sync_records::channel_id.eq(channel_id))
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(sync_records::status.eq(status_str(status)));
        }

        let results = query
            .order(sync_records::started_at.desc())
            .limit(limit)
            .load::<SyncRecordDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}
