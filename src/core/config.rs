//! Configurazione - Caricamento delle impostazioni dalle variabili d'ambiente

use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub app_env: String,
    /// Upper bound on the nodes a single subtree walk may collect
    pub max_subtree_nodes: usize,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            max_connections: 10,
            connection_lifetime_secs: 60,
            app_env: "development".to_string(),
            max_subtree_nodes: 10_000,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = parse_var(
            "SERVER_PORT",
            defaults.server_port,
            "Invalid SERVER_PORT: must be a number between 0-65535",
        )?;

        let max_connections = parse_var(
            "MAX_DB_CONNECTIONS",
            defaults.max_connections,
            "Invalid MAX_DB_CONNECTIONS: must be a positive number",
        )?;

        let connection_lifetime_secs = parse_var(
            "DB_CONNECTION_LIFETIME_SECS",
            defaults.connection_lifetime_secs,
            "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number",
        )?;

        let app_env = env::var("APP_ENV").unwrap_or(defaults.app_env);

        let max_subtree_nodes = parse_var(
            "MAX_SUBTREE_NODES",
            defaults.max_subtree_nodes,
            "Invalid MAX_SUBTREE_NODES: must be a positive number",
        )?;

        let default_page_size: i64 = parse_var(
            "DEFAULT_PAGE_SIZE",
            defaults.default_page_size,
            "Invalid DEFAULT_PAGE_SIZE: must be a positive number",
        )?;

        let max_page_size: i64 = parse_var(
            "MAX_PAGE_SIZE",
            defaults.max_page_size,
            "Invalid MAX_PAGE_SIZE: must be a positive number",
        )?;

        if default_page_size <= 0 || max_page_size < default_page_size {
            return Err("DEFAULT_PAGE_SIZE must be positive and not above MAX_PAGE_SIZE".to_string());
        }

        Ok(Config {
            database_url,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            app_env,
            max_subtree_nodes,
            default_page_size,
            max_page_size,
        })
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!(
            environment = %self.app_env,
            address = %format!("{}:{}", self.server_host, self.server_port),
            database = %Self::mask_url(&self.database_url),
            max_connections = self.max_connections,
            connection_lifetime_secs = self.connection_lifetime_secs,
            max_subtree_nodes = self.max_subtree_nodes,
            "Server configuration loaded"
        );
        if self.app_env != "production" && self.database_url.contains(":memory:") {
            warn!("Using an in-memory database: data is lost on shutdown");
        }
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        match (url.find("://"), url.find('@')) {
            (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
                format!("{}***{}", &url[..scheme_end + 3], &url[at_pos..])
            }
            _ => url.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T, message: &str) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| message.to_string()),
        Err(_) => Ok(default),
    }
}
