//! Integration tests per articoli e thread di commenti

mod common;

#[cfg(test)]
mod comment_tests {
    use super::common::{create_test_server, create_test_state, scalar};
    use serde_json::json;
    use sqlx::SqlitePool;

    // ============================================================
    // Test per POST /articles e GET /articles/{id}
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_create_article_starts_with_zero_counters(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/articles")
            .json(&json!({ "title": "Pinning", "content": "Why Pin exists", "category_id": 4 }))
            .await;

        response.assert_status_ok();
        let article: serde_json::Value = response.json();
        assert_eq!(article["likes"], 0);
        assert_eq!(article["views"], 0);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_create_article_in_deleted_category(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        server.delete("/categories/7").await.assert_status_ok();

        let response = server
            .post("/articles")
            .json(&json!({ "title": "Lasagna", "content": "Layers", "category_id": 8 }))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles"))
    )]
    async fn test_get_article_projection(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/articles/2")
            .add_query_param("fields", "title,views")
            .await;

        response.assert_status_ok();
        let article: serde_json::Value = response.json();
        assert_eq!(article["title"], "Carbonara");
        assert_eq!(article["views"], 12);
        // colonne non richieste assenti, non valorizzate a default
        assert!(article.get("content").is_none());
        assert!(article.get("likes").is_none());
        Ok(())
    }

    // ============================================================
    // Test per /articles/{id}/comments
    // ============================================================

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles", "comments"))
    )]
    async fn test_list_top_level_comments(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/articles/1/comments").await;

        response.assert_status_ok();
        let page: serde_json::Value = response.json();
        let ids: Vec<i64> = page["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 5]);
        assert_eq!(page["page_info"]["total"], 2);
        Ok(())
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles", "comments"))
    )]
    async fn test_list_replies(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/articles/1/comments")
            .add_query_param("parent_id", 1)
            .add_query_param("query", "lifetimes")
            .await;

        response.assert_status_ok();
        let page: serde_json::Value = response.json();
        assert_eq!(page["page_info"]["total"], 1);
        assert_eq!(page["items"][0]["id"], 3);
        Ok(())
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles", "comments"))
    )]
    async fn test_reply_to_comment_of_other_article(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/articles/1/comments")
            .json(&json!({ "user_id": 10, "parent_id": 6, "content": "Wrong thread" }))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles", "comments"))
    )]
    async fn test_reply_success(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/articles/2/comments")
            .json(&json!({ "user_id": 12, "parent_id": 7, "content": "Always guanciale" }))
            .await;

        response.assert_status_ok();
        let comment: serde_json::Value = response.json();
        assert_eq!(comment["article_id"], 2);
        assert_eq!(comment["parent_id"], 7);
        assert_eq!(comment["likes"], 0);
        Ok(())
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles", "comments"))
    )]
    async fn test_delete_comment_thread(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        let response = server.delete("/articles/1/comments/1").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["deleted"], 4);
        assert_eq!(
            scalar(&pool, "SELECT COUNT(*) FROM comments WHERE deleted_at IS NULL").await,
            3
        );
        Ok(())
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures(path = "../fixtures", scripts("categories", "articles", "comments"))
    )]
    async fn test_delete_comment_through_wrong_article(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        server
            .delete("/articles/1/comments/6")
            .await
            .assert_status_not_found();
        assert_eq!(
            scalar(&pool, "SELECT COUNT(*) FROM comments WHERE deleted_at IS NOT NULL").await,
            0
        );
        Ok(())
    }
}
