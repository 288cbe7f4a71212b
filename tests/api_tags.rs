//! Integration tests per gli endpoints dei tag

mod common;

#[cfg(test)]
mod tag_tests {
    use super::common::{create_test_server, create_test_state, scalar};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("tags")))]
    async fn test_create_duplicate_tag(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.post("/tags").json(&json!({ "name": "recipes" })).await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Constraint violation");
        // nessun dettaglio dello schema verso il client
        assert!(!body["details"].as_str().unwrap().contains("tags.name"));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("tags")))]
    async fn test_delete_tag_frees_name(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        server
            .delete("/tags/2")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server.get("/tags/2").await.assert_status_not_found();

        let response = server.post("/tags").json(&json!({ "name": "recipes" })).await;
        response.assert_status_ok();

        // la riga cancellata resta, con il nome riscritto
        assert_eq!(
            scalar(
                &pool,
                "SELECT COUNT(*) FROM tags WHERE id = 2 AND name LIKE 'recipes-%' AND deleted_at IS NOT NULL"
            )
            .await,
            1
        );
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("tags")))]
    async fn test_delete_tag_twice(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .delete("/tags/1")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server.delete("/tags/1").await.assert_status_not_found();
        Ok(())
    }
}
