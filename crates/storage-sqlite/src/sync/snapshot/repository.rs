//! Repository for channel snapshot persistence. Snapshots are write-once.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use creatorpulse_core::errors::Result;
use creatorpulse_core::sync::{ChannelSnapshot, ChannelSnapshotRepositoryTrait};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::channel_snapshots;

use super::model::ChannelSnapshotDB;

pub struct ChannelSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChannelSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ChannelSnapshotRepositoryTrait for ChannelSnapshotRepository {
    async fn create(&self, snapshot: ChannelSnapshot) -> Result<ChannelSnapshot> {
        self.writer
            .exec(move |conn| {
                let db_model: ChannelSnapshotDB = snapshot.into();

                diesel::insert_into(channel_snapshots::table)
                    .values(&db_model)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(db_model.into())
            })
            .await
    }

    fn get_by_sync_id(&self, sync_id: &str) -> Result<Option<ChannelSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let result = channel_snapshots::table
            .filter(channel_snapshots::sync_id.eq(sync_id))
            .first::<ChannelSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Into::into))
    }

    fn get_latest_for_channel(&self, channel_id: &str) -> Result<Option<ChannelSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let result = channel_snapshots::table
            .filter(channel_snapshots::channel_id.eq(channel_id))
            .order(channel_snapshots::sync_timestamp.desc())
            .first::<ChannelSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Into::into))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    channel_snapshots::table
                        .filter(channel_snapshots::sync_timestamp.lt(cutoff.to_rfc3339())),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                Ok(deleted)
            })
            .await
    }
}
