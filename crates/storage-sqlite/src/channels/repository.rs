//! Repository for local channel records.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use creatorpulse_core::channels::{Channel, ChannelRepositoryTrait, UpsertOutcome};
use creatorpulse_core::errors::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::channels;

use super::model::ChannelDB;

pub struct ChannelRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChannelRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ChannelRepositoryTrait for ChannelRepository {
    async fn upsert(&self, channel: Channel) -> Result<UpsertOutcome> {
        self.writer
            .exec(move |conn| {
                let existing = channels::table
                    .find(&channel.channel_id)
                    .first::<ChannelDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                match existing {
                    Some(existing_row) => {
                        let mut db_model: ChannelDB = channel.into();
                        // The original creation time survives refreshes.
                        db_model.created_at = existing_row.created_at;

                        diesel::update(channels::table.find(&db_model.channel_id))
                            .set(&db_model)
                            .execute(conn)
                            .map_err(StorageError::from)?;

                        Ok(UpsertOutcome::Updated)
                    }
                    None => {
                        let db_model: ChannelDB = channel.into();
                        diesel::insert_into(channels::table)
                            .values(&db_model)
                            .execute(conn)
                            .map_err(StorageError::from)?;

                        Ok(UpsertOutcome::Inserted)
                    }
                }
            })
            .await
    }

    fn get_by_id(&self, channel_id: &str) -> Result<Option<Channel>> {
        let mut conn = get_connection(&self.pool)?;

        let result = channels::table
            .find(channel_id)
            .first::<ChannelDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Into::into))
    }
}
