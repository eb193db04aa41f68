//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time; funneling every write through one
//! dedicated connection inside an immediate transaction serializes them and
//! gives multi-step jobs (like the running-record guard check-and-insert)
//! atomicity for free.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use creatorpulse_core::errors::Result;

use super::DbPool;
use crate::errors::StorageError;

type WriteJob<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for submitting write jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        WriteJob<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Run a job on the writer's dedicated connection, inside an immediate
    /// transaction, and return its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        // Box the return value so jobs with different types share one channel.
        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result"))
            })
    }
}

/// Spawn the background task that owns one connection and processes write
/// jobs serially. Returns the handle used to submit jobs.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        WriteJob<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            // A failing job rolls the transaction back; its typed error is
            // kept aside so callers see it (e.g. the running-record guard
            // rejection), not a generic rollback error.
            let mut job_err = None;
            let result = conn
                .immediate_transaction::<_, diesel::result::Error, _>(|c| match job(c) {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        job_err = Some(err);
                        Err(diesel::result::Error::RollbackTransaction)
                    }
                })
                .map_err(|tx_err| match job_err.take() {
                    Some(err) => err,
                    None => StorageError::QueryFailed(tx_err).into(),
                });

            // The requester may have gone away; that is fine.
            let _ = reply_tx.send(result);
        }
        // Channel closed: all handles dropped, the actor terminates.
    });

    WriteHandle { tx }
}
