//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod article;
pub mod category;
pub mod comment;
pub mod engagement;
pub mod query;
pub mod tag;

// Re-exports per facilitare l'import
pub use article::{ArticleDTO, CreateArticleDTO};
pub use category::{CategoryDTO, CreateCategoryDTO, UpdateCategoryDTO};
pub use comment::{CommentDTO, CreateCommentDTO};
pub use engagement::{EngagementDTO, EngagementRequestDTO};
pub use query::{DeletedDTO, PageParams, Paginated, Projected, ThreadQuery};
pub use tag::{CreateTagDTO, TagDTO};
