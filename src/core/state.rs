//! Application State - Stato globale dell'applicazione
//!
//! Contiene il pool, la configurazione e un repository per ogni entità.
//! I repository sono senza stato: la connessione viene passata a ogni chiamata.

use super::config::Config;
use crate::entities::{Article, Category, Comment, Tag, UserLike, UserView};
use crate::lifecycle::CounterTargets;
use crate::repositories::Repository;
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route
pub struct AppState {
    /// Pool di connessioni SQLite
    pub pool: SqlitePool,

    pub config: Config,

    pub categories: Repository<Category>,
    pub articles: Repository<Article>,
    pub comments: Repository<Comment>,
    pub tags: Repository<Tag>,

    /// Engagement: like e visualizzazioni
    pub likes: Repository<UserLike>,
    pub views: Repository<UserView>,
}

impl AppState {
    /// Crea una nuova istanza di AppState
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `config` - Configurazione già validata
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            config,
            categories: Repository::new(),
            articles: Repository::new(),
            comments: Repository::new(),
            tags: Repository::new(),
            likes: Repository::new(),
            views: Repository::new(),
        }
    }

    /// Repositories an engagement counter may point at
    pub fn counter_targets(&self) -> CounterTargets<'_> {
        CounterTargets {
            articles: &self.articles,
            comments: &self.comments,
            tags: &self.tags,
        }
    }
}
