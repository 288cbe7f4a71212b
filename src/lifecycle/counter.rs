//! Counter mutator - Engagement e contatore aggiornati atomicamente
//!
//! `apply` inserisce la riga di engagement e incrementa il contatore del
//! target; `undo` cerca l'engagement attivo, lo marca come cancellato e
//! decrementa il contatore. Entrambi i passi stanno nella stessa
//! transazione: o vengono scritti tutti e due o nessuno.
//!
//! Il contatore viene aggiornato relativamente all'ultimo valore letto
//! (`valore ± 1`) e non ricalcolato con un COUNT delle righe attive.

use super::tombstone;
use crate::core::error::{StoreError, StoreResult};
use crate::core::transaction::{UnitOfWork, catch_fault};
use crate::entities::{Article, Comment, NewEngagement, ObjectType, Tag};
use crate::repositories::{Counted, Engagement, Insertable, Repository, Value};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

/// Repositories of every entity an engagement may point at
#[derive(Clone, Copy)]
pub struct CounterTargets<'a> {
    pub articles: &'a Repository<Article>,
    pub comments: &'a Repository<Comment>,
    pub tags: &'a Repository<Tag>,
}

pub struct CounterMutator<'a, G> {
    pool: &'a SqlitePool,
    engagements: &'a Repository<G>,
    targets: CounterTargets<'a>,
}

impl<'a, G> CounterMutator<'a, G>
where
    G: Engagement,
    NewEngagement: Insertable<G>,
{
    pub fn new(
        pool: &'a SqlitePool,
        engagements: &'a Repository<G>,
        targets: CounterTargets<'a>,
    ) -> Self {
        Self {
            pool,
            engagements,
            targets,
        }
    }

    /// Records the engagement and increments the target's counter.
    ///
    /// # Returns
    /// * `Ok(value)` - Counter value after the increment
    /// * `Err(StoreError::ConstraintViolation)` - The user already has an active engagement
    /// * `Err(StoreError::NotFound)` - The target does not exist
    pub async fn apply(&self, target_id: i64, user_id: i64, object_type: ObjectType) -> StoreResult<i64> {
        match object_type {
            ObjectType::Article => self.apply_on(self.targets.articles, target_id, user_id).await,
            ObjectType::Comment => self.apply_on(self.targets.comments, target_id, user_id).await,
            ObjectType::Tag => self.apply_on(self.targets.tags, target_id, user_id).await,
        }
    }

    /// Removes the user's active engagement and decrements the target's counter.
    ///
    /// # Returns
    /// * `Ok(value)` - Counter value after the decrement
    /// * `Err(StoreError::NotFound)` - No active engagement to undo
    pub async fn undo(&self, target_id: i64, user_id: i64, object_type: ObjectType) -> StoreResult<i64> {
        match object_type {
            ObjectType::Article => self.undo_on(self.targets.articles, target_id, user_id).await,
            ObjectType::Comment => self.undo_on(self.targets.comments, target_id, user_id).await,
            ObjectType::Tag => self.undo_on(self.targets.tags, target_id, user_id).await,
        }
    }

    #[instrument(skip(self, targets), fields(engagement = G::TABLE, target = T::TABLE))]
    pub async fn apply_on<T: Counted>(
        &self,
        targets: &Repository<T>,
        target_id: i64,
        user_id: i64,
    ) -> StoreResult<i64> {
        ensure_counter::<G, T>()?;

        let mut work = UnitOfWork::begin(self.pool).await?;
        let outcome = catch_fault(self.apply_steps(work.conn(), targets, target_id, user_id)).await;
        let value = work.complete(outcome).await?;

        info!("{} on {} {} is now {}", G::COUNTER.column(), T::NAME, target_id, value);
        Ok(value)
    }

    #[instrument(skip(self, targets), fields(engagement = G::TABLE, target = T::TABLE))]
    pub async fn undo_on<T: Counted>(
        &self,
        targets: &Repository<T>,
        target_id: i64,
        user_id: i64,
    ) -> StoreResult<i64> {
        ensure_counter::<G, T>()?;

        let mut work = UnitOfWork::begin(self.pool).await?;
        let outcome = catch_fault(self.undo_steps(work.conn(), targets, target_id, user_id)).await;
        let value = work.complete(outcome).await?;

        info!("{} on {} {} is now {}", G::COUNTER.column(), T::NAME, target_id, value);
        Ok(value)
    }

    async fn apply_steps<T: Counted>(
        &self,
        conn: &mut SqliteConnection,
        targets: &Repository<T>,
        target_id: i64,
        user_id: i64,
    ) -> StoreResult<i64> {
        let engagement = NewEngagement {
            user_id,
            object_id: target_id,
            object_type: T::OBJECT_TYPE,
        };
        self.engagements.create(conn, &engagement).await?;
        debug!("Engagement recorded");

        shift_counter::<G, T>(conn, targets, target_id, 1).await
    }

    async fn undo_steps<T: Counted>(
        &self,
        conn: &mut SqliteConnection,
        targets: &Repository<T>,
        target_id: i64,
        user_id: i64,
    ) -> StoreResult<i64> {
        let existing = self
            .engagements
            .find_active(conn, user_id, target_id, T::OBJECT_TYPE)
            .await?;
        tombstone::soft_delete(self.engagements, conn, &existing).await?;
        debug!(
            "Engagement {} of user {} on {} {} tombstoned",
            existing.id(),
            existing.user_id(),
            existing.object_type(),
            existing.object_id()
        );

        shift_counter::<G, T>(conn, targets, target_id, -1).await
    }
}

fn ensure_counter<G: Engagement, T: Counted>() -> StoreResult<()> {
    if T::supports(G::COUNTER) {
        Ok(())
    } else {
        Err(StoreError::InvalidField(format!(
            "{}.{}",
            T::TABLE,
            G::COUNTER.column()
        )))
    }
}

/// Reads the counter inside the transaction and writes `value + delta`.
async fn shift_counter<G: Engagement, T: Counted>(
    conn: &mut SqliteConnection,
    targets: &Repository<T>,
    target_id: i64,
    delta: i64,
) -> StoreResult<i64> {
    let column = G::COUNTER.column();
    let target = targets.get_by_id(conn, target_id, &[column]).await?;
    let current = target
        .counter(G::COUNTER)
        .ok_or_else(|| StoreError::InvalidField(format!("{}.{}", T::TABLE, column)))?;

    let next = current + delta;
    targets
        .update_by_id(conn, target_id, vec![(column, Value::Int(next))])
        .await?;
    Ok(next)
}
