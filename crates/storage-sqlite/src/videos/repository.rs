//! Repository for local video records.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use creatorpulse_core::channels::{UpsertOutcome, Video, VideoRepositoryTrait};
use creatorpulse_core::errors::Result;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::videos;

use super::model::VideoDB;

pub struct VideoRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VideoRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl VideoRepositoryTrait for VideoRepository {
    async fn upsert(&self, video: Video) -> Result<UpsertOutcome> {
        self.writer
            .exec(move |conn| {
                let existing = videos::table
                    .find(&video.video_id)
                    .first::<VideoDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                match existing {
                    Some(existing_row) => {
                        let mut db_model: VideoDB = video.into();
                        db_model.created_at = existing_row.created_at;

                        diesel::update(videos::table.find(&db_model.video_id))
                            .set(&db_model)
                            .execute(conn)
                            .map_err(StorageError::from)?;

                        Ok(UpsertOutcome::Updated)
                    }
                    None => {
                        let db_model: VideoDB = video.into();
                        diesel::insert_into(videos::table)
                            .values(&db_model)
                            .execute(conn)
                            .map_err(StorageError::from)?;

                        Ok(UpsertOutcome::Inserted)
                    }
                }
            })
            .await
    }

    fn get_by_id(&self, video_id: &str) -> Result<Option<Video>> {
        let mut conn = get_connection(&self.pool)?;

        let result = videos::table
            .find(video_id)
            .first::<VideoDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Into::into))
    }

    fn list_for_channel(&self, channel_id: &str) -> Result<Vec<Video>> {
        let mut conn = get_connection(&self.pool)?;

        let results = videos::table
            .filter(videos::channel_id.eq(channel_id))
            .order(videos::published_at.desc())
            .load::<VideoDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}
