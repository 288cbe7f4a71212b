//! Integration tests per gli endpoints delle categorie

mod common;

#[cfg(test)]
mod category_tests {
    use super::common::{create_test_server, create_test_state, create_test_state_with_cap, scalar};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    // ============================================================
    // Test per GET /
    // ============================================================

    #[sqlx::test(migrations = "./migrations")]
    async fn test_root_health(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("Server is running!");
        Ok(())
    }

    // ============================================================
    // Test per POST /categories - create_category
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_create_category_success(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/categories")
            .json(&json!({ "name": "Zig", "slug": "zig", "parent_id": 1 }))
            .await;

        response.assert_status_ok();
        let category: serde_json::Value = response.json();
        assert_eq!(category["name"], "Zig");
        assert_eq!(category["parent_id"], 1);
        assert!(category["id"].as_i64().is_some());
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_create_category_duplicate_name(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/categories")
            .json(&json!({ "name": "Rust", "slug": "rust-lang" }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_create_category_missing_parent(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/categories")
            .json(&json!({ "name": "Orphan", "slug": "orphan", "parent_id": 999 }))
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_category_empty_name(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/categories")
            .json(&json!({ "name": "", "slug": "empty" }))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per GET /categories e /categories/{id}/children
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_list_roots(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/categories").await;

        response.assert_status_ok();
        let page: serde_json::Value = response.json();
        let names: Vec<&str> = page["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Tech", "Food"]);
        assert_eq!(page["page_info"]["total"], 2);
        assert_eq!(page["page_info"]["page"], 1);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_list_children_paginated(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/categories/1/children")
            .add_query_param("page", 2)
            .add_query_param("page_size", 1)
            .await;

        response.assert_status_ok();
        let page: serde_json::Value = response.json();
        assert_eq!(page["items"][0]["name"], "Go");
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
        assert_eq!(page["page_info"]["total"], 2);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_list_children_text_query_is_case_sensitive(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let lower = server
            .get("/categories/2/children")
            .add_query_param("query", "sync")
            .await;
        let upper = server
            .get("/categories/2/children")
            .add_query_param("query", "SYNC")
            .await;

        let lower: serde_json::Value = lower.json();
        let upper: serde_json::Value = upper.json();
        assert_eq!(lower["page_info"]["total"], 1);
        assert_eq!(lower["items"][0]["name"], "Async");
        assert_eq!(upper["page_info"]["total"], 0);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_unknown_projection_field(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/categories/1")
            .add_query_param("fields", "name,password")
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per PATCH /categories/{id} - update_category
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_rename_category(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .patch("/categories/3")
            .json(&json!({ "name": "Golang" }))
            .await;

        response.assert_status_ok();
        let category: serde_json::Value = response.json();
        assert_eq!(category["name"], "Golang");
        assert_eq!(category["slug"], "go");
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_rename_without_fields(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.patch("/categories/3").json(&json!({})).await;

        response.assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per DELETE /categories/{id} - delete_category
    // ============================================================

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_delete_subtree(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool.clone()));

        let response = server.delete("/categories/2").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["deleted"], 4);

        server.get("/categories/6").await.assert_status_not_found();
        server.get("/categories/3").await.assert_status_ok();
        assert_eq!(
            scalar(&pool, "SELECT COUNT(*) FROM categories WHERE deleted_at IS NOT NULL").await,
            4
        );
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_deleted_names_can_be_reused(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server.delete("/categories/7").await.assert_status_ok();
        let response = server
            .post("/categories")
            .json(&json!({ "name": "Pasta", "slug": "pasta" }))
            .await;

        response.assert_status_ok();
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_delete_missing_category(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server.delete("/categories/404").await.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_delete_subtree_over_cap(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state_with_cap(pool.clone(), 2));

        let response = server.delete("/categories/1").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            scalar(&pool, "SELECT COUNT(*) FROM categories WHERE deleted_at IS NOT NULL").await,
            0
        );
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_descendants_breadth_first(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/categories/1/descendants")
            .add_query_param("fields", "name")
            .await;

        response.assert_status_ok();
        let nodes: Vec<serde_json::Value> = response.json();
        let ids: Vec<i64> = nodes.iter().map(|n| n["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
        Ok(())
    }

    /// Test: la proiezione restituisce solo `id` e le colonne richieste
    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_get_category_omits_unrequested_columns(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/categories/2")
            .add_query_param("fields", "name")
            .await;

        response.assert_status_ok();
        let category: serde_json::Value = response.json();
        assert_eq!(category["id"], 2);
        assert!(category["name"].is_string());
        assert!(category.get("parent_id").is_none());
        assert!(category.get("slug").is_none());
        assert!(category.get("created_at").is_none());
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations", fixtures(path = "../fixtures", scripts("categories")))]
    async fn test_get_category_without_fields_is_complete(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server.get("/categories/2").await;

        response.assert_status_ok();
        let category: serde_json::Value = response.json();
        assert_eq!(category["parent_id"], 1);
        assert!(category["slug"].is_string());
        Ok(())
    }
}
