//! Hierarchy - Navigazione e cancellazione ricorsiva di un albero
//!
//! Usato identicamente per le categorie e per i commenti; per i commenti lo
//! scope limita ogni lettura all'articolo che li contiene.

use super::tombstone;
use super::tree::TreeResolver;
use crate::core::error::StoreResult;
use crate::core::transaction::{UnitOfWork, catch_fault};
use crate::repositories::{Filter, PageInfo, PageQuery, Repository, Tombstone, TreeNode};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument};

pub struct Hierarchy<'a, E> {
    pool: &'a SqlitePool,
    repo: &'a Repository<E>,
    scope: Filter,
    max_nodes: usize,
}

impl<'a, E: TreeNode + Tombstone> Hierarchy<'a, E> {
    pub fn new(pool: &'a SqlitePool, repo: &'a Repository<E>, max_nodes: usize) -> Self {
        Self {
            pool,
            repo,
            scope: Filter::active(),
            max_nodes,
        }
    }

    pub fn scoped(mut self, scope: Filter) -> Self {
        self.scope = scope;
        self
    }

    fn resolver(&self) -> TreeResolver<'a, E> {
        TreeResolver::new(self.repo, self.max_nodes).scoped(self.scope.clone())
    }

    /// Active node inside the scope
    pub async fn get(&self, id: i64, fields: &[&str]) -> StoreResult<E> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_one(&mut conn, fields, &self.scope.clone().eq("id", id))
            .await
    }

    /// Bounded page of the direct children of `parent_id` (`None` lists the roots).
    #[instrument(skip(self, fields, page), fields(table = E::TABLE))]
    pub async fn paginate_children(
        &self,
        parent_id: Option<i64>,
        fields: &[&str],
        page: &PageQuery,
    ) -> StoreResult<(Vec<E>, PageInfo)> {
        let mut conn = self.pool.acquire().await?;
        let filter = self.scope.clone().eq(E::PARENT_COLUMN, parent_id);
        let (children, info) = self.repo.find_page(&mut conn, fields, &filter, page).await?;
        debug!("Returning {} of {} children", children.len(), info.total);
        Ok((children, info))
    }

    /// Every descendant of `root_id`, read outside any transaction.
    pub async fn collect_descendants(&self, root_id: i64, fields: &[&str]) -> StoreResult<Vec<E>> {
        let mut conn = self.pool.acquire().await?;
        self.resolver()
            .collect_descendants(&mut conn, root_id, fields)
            .await
    }

    /// Soft-deletes `root_id` and its whole subtree in one transaction.
    ///
    /// Descendants are resolved first; then, inside the transaction, the root
    /// is fetched and every node is tombstoned in walk order. Any failure,
    /// including a recovered panic, rolls back every node.
    ///
    /// # Returns
    /// * `Ok(n)` - Number of nodes deleted, root included
    /// * `Err(StoreError::NotFound)` - The root is missing, deleted or out of scope
    #[instrument(skip(self, fields), fields(table = E::TABLE))]
    pub async fn delete_subtree(&self, root_id: i64, fields: &[&str]) -> StoreResult<usize> {
        let projection = tombstone_projection::<E>(fields);
        let descendants = self.collect_descendants(root_id, &projection).await?;
        debug!("Subtree of {} has {} descendants", root_id, descendants.len());

        let mut work = UnitOfWork::begin(self.pool).await?;
        let outcome = catch_fault(self.tombstone_all(work.conn(), root_id, &projection, descendants)).await;
        let deleted = work.complete(outcome).await?;

        info!("Deleted subtree of {} ({} nodes)", root_id, deleted);
        Ok(deleted)
    }

    async fn tombstone_all(
        &self,
        conn: &mut SqliteConnection,
        root_id: i64,
        fields: &[&str],
        mut nodes: Vec<E>,
    ) -> StoreResult<usize> {
        let root = self
            .repo
            .find_one(conn, fields, &self.scope.clone().eq("id", root_id))
            .await?;
        nodes.push(root);

        for node in &nodes {
            tombstone::soft_delete(self.repo, conn, node).await?;
        }

        Ok(nodes.len())
    }
}

/// Caller's projection widened with the columns the tombstone rewrites
fn tombstone_projection<'f, E: TreeNode + Tombstone>(fields: &[&'f str]) -> Vec<&'f str> {
    if fields.is_empty() {
        return Vec::new();
    }
    let mut widened = fields.to_vec();
    let required = E::UNIQUE_COLUMNS
        .iter()
        .copied()
        .chain(std::iter::once(E::PARENT_COLUMN));
    for column in required {
        if !widened.contains(&column) {
            widened.push(column);
        }
    }
    widened
}
