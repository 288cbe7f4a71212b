//! Category repository - Metadati e query specifiche delle categorie

use super::query::{FieldMap, Filter, Value};
use super::traits::{Entity, Insertable, Tombstone, TreeNode};
use super::Repository;
use crate::core::error::StoreResult;
use crate::entities::{Category, NewCategory};
use crate::lifecycle::tombstone::tombstoned;
use sqlx::SqliteConnection;

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const NAME: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "slug",
        "parent_id",
        "created_at",
        "updated_at",
        "deleted_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Insertable<Category> for NewCategory {
    fn values(&self) -> FieldMap {
        vec![
            ("name", Value::from(self.name.as_str())),
            ("slug", Value::from(self.slug.as_str())),
            ("parent_id", Value::from(self.parent_id)),
        ]
    }
}

impl Tombstone for Category {
    const UNIQUE_COLUMNS: &'static [&'static str] = &["name", "slug"];

    fn tombstone_fields(&self, token: &str) -> FieldMap {
        vec![
            ("name", Value::Text(tombstoned(&self.name, token))),
            ("slug", Value::Text(tombstoned(&self.slug, token))),
        ]
    }
}

impl TreeNode for Category {}

impl Repository<Category> {
    /// Active category with the given slug
    pub async fn find_by_slug(
        &self,
        conn: &mut SqliteConnection,
        slug: &str,
    ) -> StoreResult<Category> {
        self.find_one(conn, &[], &Filter::active().eq("slug", slug))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StoreError;
    use crate::repositories::PageQuery;
    use sqlx::SqlitePool;

    fn new_category(name: &str, parent_id: Option<i64>) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: name.to_lowercase(),
            parent_id,
        }
    }

    /// Test: create assegna id e timestamp e rilegge la riga
    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_reads_back_row(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let created = repo.create(&mut conn, &new_category("Rust", None)).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.name, "Rust");
        assert_eq!(created.slug, "rust");
        assert_eq!(created.parent_id, None);
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.deleted_at.is_none());
    }

    /// Test: un nome duplicato viola il vincolo di unicità
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_create_duplicate_name_is_constraint_violation(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let result = repo
            .create(
                &mut conn,
                &NewCategory {
                    name: "Rust".to_string(),
                    slug: "rust-2".to_string(),
                    parent_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
    }

    /// Test: un genitore inesistente viola la foreign key
    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_with_missing_parent_is_constraint_violation(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let result = repo.create(&mut conn, &new_category("Orphan", Some(42))).await;

        assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
    }

    /// Test: update parziale modifica solo le colonne indicate e aggiorna updated_at
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_update_by_id_partial(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();
        let before = repo.get_by_id(&mut conn, 2, &[]).await.unwrap();

        repo.update_by_id(&mut conn, 2, vec![("name", Value::from("Rust lang"))])
            .await
            .unwrap();

        let after = repo.get_by_id(&mut conn, 2, &[]).await.unwrap();
        assert_eq!(after.name, "Rust lang");
        assert_eq!(after.slug, before.slug);
        assert_eq!(after.parent_id, before.parent_id);
        assert!(after.updated_at > before.updated_at);
    }

    /// Test: update di una colonna non dichiarata viene rifiutato prima della query
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_update_by_id_rejects_unknown_column(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let unknown = repo
            .update_by_id(&mut conn, 2, vec![("password", Value::from("x"))])
            .await;
        let primary_key = repo
            .update_by_id(&mut conn, 2, vec![("id", Value::from(99_i64))])
            .await;

        assert!(matches!(unknown, Err(StoreError::InvalidField(_))));
        assert!(matches!(primary_key, Err(StoreError::InvalidField(_))));
    }

    /// Test: update di un id inesistente restituisce NotFound
    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_by_id_missing_row(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let result = repo
            .update_by_id(&mut conn, 999, vec![("name", Value::from("ghost"))])
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { entity: "category" })));
    }

    /// Test: get_by_id con proiezione lascia ai default i campi non selezionati
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_get_by_id_projection(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let category = repo.get_by_id(&mut conn, 4, &["name"]).await.unwrap();

        assert_eq!(category.id, 4);
        assert_eq!(category.name, "Async");
        assert_eq!(category.slug, "");
        assert_eq!(category.parent_id, None);
    }

    /// Test: delete_by_id rimuove fisicamente la riga
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_delete_by_id_is_physical(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        repo.delete_by_id(&mut conn, 6).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = 6")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(matches!(
            repo.delete_by_id(&mut conn, 6).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    /// Test: paginate rispetta limit/offset in ordine di id
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_paginate_offset_limit(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let (rows, info) = repo
            .find_page(&mut conn, &[], &Filter::active(), &PageQuery::new(2, 3))
            .await
            .unwrap();

        let ids: Vec<i64> = rows.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(info.total, 8);
        assert_eq!(info.page, 2);
        assert_eq!(info.page_size, 3);
    }

    /// Test: find_by_slug trova solo categorie attive
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../../fixtures", scripts("categories")))]
    async fn test_find_by_slug(pool: SqlitePool) {
        let repo = Repository::<Category>::new();
        let mut conn = pool.acquire().await.unwrap();

        let category = repo.find_by_slug(&mut conn, "tokio").await.unwrap();
        assert_eq!(category.id, 6);

        sqlx::query("UPDATE categories SET deleted_at = '2025-02-01T00:00:00Z' WHERE id = 6")
            .execute(&mut *conn)
            .await
            .unwrap();
        assert!(repo.find_by_slug(&mut conn, "tokio").await.is_err());
    }
}
