//! Repository for sync configuration persistence.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use creatorpulse_core::errors::Result;
use creatorpulse_core::sync::{
    SyncConfiguration, SyncConfigurationRepositoryTrait, SyncConfigurationUpdate,
};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::sync_configurations;

use super::model::SyncConfigurationDB;

pub struct SyncConfigurationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SyncConfigurationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_by_channel(
    conn: &mut SqliteConnection,
    channel_id: &str,
) -> Result<Option<SyncConfigurationDB>> {
    sync_configurations::table
        .filter(sync_configurations::channel_id.eq(channel_id))
        .first::<SyncConfigurationDB>(conn)
        .optional()
        .map_err(|e| StorageError::from(e).into())
}

#[async_trait]
impl SyncConfigurationRepositoryTrait for SyncConfigurationRepository {
    /// Create-on-read: the select and the default insert share one writer
    /// transaction, so concurrent first reads still produce a single row.
    async fn get_or_create(&self, channel_id: &str) -> Result<SyncConfiguration> {
        let channel_id = channel_id.to_string();
        self.writer
            .exec(move |conn| {
                if let Some(existing) = find_by_channel(conn, &channel_id)? {
                    return Ok(existing.into());
                }

                let db_model: SyncConfigurationDB =
                    SyncConfiguration::new_default(channel_id).into();
                diesel::insert_into(sync_configurations::table)
                    .values(&db_model)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(db_model.into())
            })
            .await
    }

    fn list_enabled(&self) -> Result<Vec<SyncConfiguration>> {
        let mut conn = get_connection(&self.pool)?;

        let results = sync_configurations::table
            .filter(sync_configurations::sync_enabled.eq(true))
            .order(sync_configurations::channel_id.asc())
            .load::<SyncConfigurationDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        channel_id: &str,
        update: SyncConfigurationUpdate,
    ) -> Result<SyncConfiguration> {
        let channel_id = channel_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut config: SyncConfiguration = match find_by_channel(conn, &channel_id)? {
                    Some(existing) => existing.into(),
                    None => SyncConfiguration::new_default(channel_id.clone()),
                };
                config.apply(update);

                let db_model: SyncConfigurationDB = config.into();
                diesel::replace_into(sync_configurations::table)
                    .values(&db_model)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(db_model.into())
            })
            .await
    }
}
