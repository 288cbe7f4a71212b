//! Entities module - Entità del dominio applicativo
//!
//! Ogni entity corrisponde a una tabella nel database e dichiara, tramite i
//! trait di `repositories::traits`, tabella, colonne e campi univoci.

pub mod article;
pub mod category;
pub mod comment;
pub mod engagement;
pub mod enums;
pub mod tag;

// Re-exports per facilitare l'import
pub use article::{Article, NewArticle};
pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use engagement::{NewEngagement, UserLike, UserView};
pub use enums::{Counter, ObjectType};
pub use tag::{NewTag, Tag};
