//! Tree resolver - Raccolta dei discendenti di un nodo
//!
//! Visita in ampiezza con una coda esplicita: per ogni nodo scoperto si
//! leggono tutti i figli (pagina illimitata) e li si accoda. Un insieme dei
//! nodi visitati intercetta eventuali cicli dovuti a dati corrotti e un
//! limite sul numero di nodi tiene sotto controllo memoria e durata.

use crate::core::error::{StoreError, StoreResult};
use crate::repositories::{Filter, PageQuery, Repository, TreeNode};
use sqlx::SqliteConnection;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument, warn};

pub struct TreeResolver<'r, E> {
    repo: &'r Repository<E>,
    scope: Filter,
    max_nodes: usize,
}

impl<'r, E: TreeNode> TreeResolver<'r, E> {
    pub fn new(repo: &'r Repository<E>, max_nodes: usize) -> Self {
        Self {
            repo,
            scope: Filter::active(),
            max_nodes,
        }
    }

    /// Restricts every children lookup, e.g. comments of one article.
    pub fn scoped(mut self, scope: Filter) -> Self {
        self.scope = scope;
        self
    }

    /// Every transitive descendant of `root_id` (root excluded), in
    /// breadth-first discovery order.
    ///
    /// The first failing lookup aborts the walk; no partial result is returned.
    ///
    /// # Returns
    /// * `Err(StoreError::CycleDetected)` - A node was reached twice
    /// * `Err(StoreError::SubtreeTooLarge)` - More than `max_nodes` descendants
    #[instrument(skip(self, conn, fields), fields(table = E::TABLE))]
    pub async fn collect_descendants(
        &self,
        conn: &mut SqliteConnection,
        root_id: i64,
        fields: &[&str],
    ) -> StoreResult<Vec<E>> {
        let mut visited = HashSet::from([root_id]);
        let mut pending = VecDeque::from([root_id]);
        let mut nodes = Vec::new();
        let all_children = PageQuery::unbounded();

        while let Some(parent_id) = pending.pop_front() {
            let filter = self.scope.clone().eq(E::PARENT_COLUMN, parent_id);
            let children = self
                .repo
                .paginate(conn, fields, &filter, &all_children)
                .await?;

            for child in children {
                let child_id = child.id();
                if !visited.insert(child_id) {
                    warn!("Node {} reached twice while walking from {}", child_id, root_id);
                    return Err(StoreError::CycleDetected(child_id));
                }
                if nodes.len() >= self.max_nodes {
                    warn!("Subtree of {} exceeds {} nodes", root_id, self.max_nodes);
                    return Err(StoreError::SubtreeTooLarge(self.max_nodes));
                }
                pending.push_back(child_id);
                nodes.push(child);
            }
        }

        debug!("Collected {} descendants", nodes.len());
        Ok(nodes)
    }
}
