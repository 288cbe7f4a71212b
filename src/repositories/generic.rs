//! Repository generico - Primitive CRUD parametrizzate sull'entità
//!
//! Il repository non possiede né pool né connessioni: ogni chiamata riceve
//! esplicitamente la connessione (del pool o di una transazione), così più
//! chiamate si compongono nella stessa transazione.

use super::query::{FieldMap, Filter, PageInfo, PageQuery, Value, projection, resolve_column};
use super::traits::{Entity, Insertable};
use crate::core::error::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::marker::PhantomData;
use tracing::{debug, instrument};

pub struct Repository<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Repository<E> {
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for Repository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> {
    /// Inserts a new row stamping `created_at`/`updated_at` and reads it back.
    ///
    /// # Returns
    /// * `Ok(E)` - Created entity with the id assigned by the database
    /// * `Err(StoreError::ConstraintViolation)` - Unique or foreign key rejected the row
    #[instrument(skip(self, conn, data), fields(table = E::TABLE))]
    pub async fn create<N: Insertable<E>>(
        &self,
        conn: &mut SqliteConnection,
        data: &N,
    ) -> StoreResult<E> {
        let mut values = data.values();
        for (column, _) in &values {
            resolve_column::<E>(column)?;
        }
        let now = Utc::now();
        values.push(("created_at", Value::Timestamp(now)));
        values.push(("updated_at", Value::Timestamp(now)));

        let columns: Vec<&'static str> = values.iter().map(|(column, _)| *column).collect();
        let mut builder = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", E::TABLE));
        builder.push(columns.join(", ")).push(") VALUES (");
        for (i, (_, value)) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            value.push_bind_to(&mut builder);
        }
        builder.push(")");

        let result = builder.build().execute(&mut *conn).await?;
        let new_id = result.last_insert_rowid();
        debug!("Row created with id {}", new_id);

        self.get_by_id(conn, new_id, &[]).await
    }

    /// Updates only the given columns of an active row, always stamping `updated_at`.
    ///
    /// # Returns
    /// * `Err(StoreError::NotFound)` - No active row with that id
    /// * `Err(StoreError::InvalidField)` - A column is unknown or is the primary key
    #[instrument(skip(self, conn, fields), fields(table = E::TABLE))]
    pub async fn update_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        fields: FieldMap,
    ) -> StoreResult<()> {
        for (column, _) in &fields {
            if matches!(*column, "id" | "updated_at") {
                return Err(StoreError::InvalidField(format!("{}.{}", E::TABLE, column)));
            }
            resolve_column::<E>(column)?;
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", E::TABLE));
        for (column, value) in fields {
            builder.push(column).push(" = ");
            value.push_bind_to(&mut builder);
            builder.push(", ");
        }
        builder.push("updated_at = ").push_bind(Utc::now());
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" AND deleted_at IS NULL");

        let result = builder.build().execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            debug!("No active row to update");
            return Err(StoreError::not_found(E::NAME));
        }

        Ok(())
    }

    /// Physically removes a row. Soft deletion is decided by the callers.
    #[instrument(skip(self, conn), fields(table = E::TABLE))]
    pub async fn delete_by_id(&self, conn: &mut SqliteConnection, id: i64) -> StoreResult<()> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("DELETE FROM {} WHERE id = ", E::TABLE));
        builder.push_bind(id);

        let result = builder.build().execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(E::NAME));
        }

        debug!("Row deleted");
        Ok(())
    }

    /// Reads an active row by primary key, projected on `fields` (empty = all).
    #[instrument(skip(self, conn, fields), fields(table = E::TABLE))]
    pub async fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        fields: &[&str],
    ) -> StoreResult<E> {
        self.find_one(conn, fields, &Filter::active().eq("id", id))
            .await
    }

    /// First row matching `filter`, in id order.
    pub async fn find_one(
        &self,
        conn: &mut SqliteConnection,
        fields: &[&str],
        filter: &Filter,
    ) -> StoreResult<E> {
        let columns = projection::<E>(fields)?;
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        builder.push(columns.join(", ")).push(" FROM ").push(E::TABLE);
        filter.push_where(&mut builder, None);
        builder.push(" ORDER BY id LIMIT 1");

        builder
            .build_query_as::<E>()
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(E::NAME))
    }

    /// Offset/limit fetch of the rows matching `filter` and the page's text query.
    #[instrument(skip_all, fields(table = E::TABLE, page = page.page, page_size = page.page_size))]
    pub async fn paginate(
        &self,
        conn: &mut SqliteConnection,
        fields: &[&str],
        filter: &Filter,
        page: &PageQuery,
    ) -> StoreResult<Vec<E>> {
        let columns = projection::<E>(fields)?;
        let text = page.text_filter::<E>()?;

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        builder.push(columns.join(", ")).push(" FROM ").push(E::TABLE);
        filter.push_where(&mut builder, text.as_ref());
        builder.push(" ORDER BY id");
        if let Some((limit, offset)) = page.limit_offset() {
            builder.push(" LIMIT ").push_bind(limit);
            builder.push(" OFFSET ").push_bind(offset);
        }

        let rows = builder.build_query_as::<E>().fetch_all(&mut *conn).await?;
        debug!("Fetched {} rows", rows.len());
        Ok(rows)
    }

    /// Rows matching `filter` and the page's text query, ignoring the page bounds.
    pub async fn count(
        &self,
        conn: &mut SqliteConnection,
        filter: &Filter,
        page: &PageQuery,
    ) -> StoreResult<i64> {
        let text = page.text_filter::<E>()?;

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM ");
        builder.push(E::TABLE);
        filter.push_where(&mut builder, text.as_ref());

        let total = builder.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;
        Ok(total)
    }

    /// Bounded fetch plus the total from a separate count query.
    pub async fn find_page(
        &self,
        conn: &mut SqliteConnection,
        fields: &[&str],
        filter: &Filter,
        page: &PageQuery,
    ) -> StoreResult<(Vec<E>, PageInfo)> {
        let rows = self.paginate(conn, fields, filter, page).await?;
        let total = self.count(conn, filter, page).await?;
        Ok((rows, page.page_info(total)))
    }
}
