//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Un unico `Repository<E>` generico fornisce le primitive CRUD e di
//! paginazione; i sotto-moduli per entità dichiarano tabella, colonne e
//! campi univoci delle entità e aggiungono le query specifiche.
//!
//! Nessun repository conserva stato: la connessione (o la transazione) è
//! sempre passata esplicitamente, `&mut *tx` per lavorare dentro una
//! transazione aperta, `&mut pool.acquire().await?` altrimenti.

pub mod article;
pub mod category;
pub mod comment;
pub mod engagement;
pub mod generic;
pub mod query;
pub mod tag;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Counted, Engagement, Entity, Insertable, Tombstone, TreeNode};

pub use generic::Repository;
pub use query::{FieldMap, Filter, PageInfo, PageQuery, TextFilter, Value};
