//! Transaction scope - Begin / esegui / commit o rollback
//!
//! Gli orchestratori aprono una `UnitOfWork`, eseguono i passi sulla
//! connessione della transazione dentro `catch_fault` e chiudono con
//! `complete`, che fa commit solo se tutti i passi sono andati a buon fine.

use crate::core::error::{StoreError, StoreResult};
use futures::FutureExt;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, warn};

/// A transaction that is either committed or rolled back explicitly.
pub struct UnitOfWork<'p> {
    tx: Transaction<'p, Sqlite>,
}

impl<'p> UnitOfWork<'p> {
    /// Opens the transaction holding the write lock from the start.
    ///
    /// Every unit of work writes; a deferred `BEGIN` that reads first could
    /// not upgrade its snapshot once another writer commits.
    pub async fn begin(pool: &'p SqlitePool) -> StoreResult<Self> {
        let tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        debug!("Transaction started");
        Ok(Self { tx })
    }

    /// Connection bound to the open transaction
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commits on `Ok`, rolls back on `Err` and hands the outcome back.
    pub async fn complete<T>(self, outcome: StoreResult<T>) -> StoreResult<T> {
        match outcome {
            Ok(value) => {
                self.tx.commit().await?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Rolling back transaction");
                if let Err(rollback_err) = self.tx.rollback().await {
                    // il drop della connessione annulla comunque la transazione
                    error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Runs a transaction body, turning a panic into `StoreError::RuntimeFault`.
pub async fn catch_fault<T, F>(body: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match AssertUnwindSafe(body).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(fault = %message, "Recovered panic inside transaction");
            Err(StoreError::RuntimeFault(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
