use super::DbPool;
use crate::errors::StorageError;
use birthdays_core::errors::{DatabaseError, Result};
use diesel::SqliteConnection;
use log::debug;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's connection inside one immediate transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type BoxedAny = Box<dyn Any + Send + 'static>;
type Envelope = (Job<BoxedAny>, oneshot::Sender<Result<BoxedAny>>);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs in its own `IMMEDIATE` transaction, committed before the
    /// result is returned. An `Err` from the job rolls the transaction back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as BoxedAny)),
                ret_tx,
            ))
            .await
            .map_err(|_| DatabaseError::Internal("Writer actor has stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            DatabaseError::Internal("Writer actor dropped the reply without a result".to_string())
        })??;

        boxed.downcast::<T>().map(|value| *value).map_err(|_| {
            DatabaseError::Internal("Writer actor returned an unexpected type".to_string()).into()
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// The actor owns one connection taken from the pool for its whole lifetime and
/// processes write jobs serially. It stops once every `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().map_err(StorageError::from)?;
    let (tx, mut rx) = mpsc::channel::<Envelope>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<BoxedAny> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away (timeout, cancelled request).
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped");
    });

    Ok(WriteHandle { tx })
}
