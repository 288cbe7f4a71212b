//! Comment repository - Albero delle risposte di un articolo

use super::query::{FieldMap, Value};
use super::traits::{Counted, Entity, Insertable, Tombstone, TreeNode};
use crate::entities::{Comment, Counter, NewComment, ObjectType};

impl Entity for Comment {
    const TABLE: &'static str = "comments";
    const NAME: &'static str = "comment";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "article_id",
        "parent_id",
        "user_id",
        "content",
        "likes",
        "created_at",
        "updated_at",
        "deleted_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Insertable<Comment> for NewComment {
    fn values(&self) -> FieldMap {
        vec![
            ("article_id", Value::from(self.article_id)),
            ("parent_id", Value::from(self.parent_id)),
            ("user_id", Value::from(self.user_id)),
            ("content", Value::from(self.content.as_str())),
        ]
    }
}

impl Tombstone for Comment {}

impl TreeNode for Comment {}

impl Counted for Comment {
    const OBJECT_TYPE: ObjectType = ObjectType::Comment;

    fn counter(&self, counter: Counter) -> Option<i64> {
        match counter {
            Counter::Likes => Some(self.likes),
            Counter::Views => None,
        }
    }

    fn supports(counter: Counter) -> bool {
        matches!(counter, Counter::Likes)
    }
}
