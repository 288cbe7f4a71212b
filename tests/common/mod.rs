#![allow(dead_code)]

use axum_test::TestServer;
use content_core::{AppState, Config};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool SQLite creato da `sqlx::test`
///
/// # Returns
/// Arc<AppState> con la configurazione di default
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, Config::default()))
}

/// Come `create_test_state`, con un limite sui nodi di un sottoalbero
pub fn create_test_state_with_cap(pool: SqlitePool, max_subtree_nodes: usize) -> Arc<AppState> {
    let config = Config {
        max_subtree_nodes,
        ..Config::default()
    };
    Arc::new(AppState::new(pool, config))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = content_core::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Esegue una query scalare di verifica direttamente sul database
pub async fn scalar(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(pool)
        .await
        .expect("Failed to run check query")
}
