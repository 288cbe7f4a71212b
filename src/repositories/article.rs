//! Article repository

use super::query::{FieldMap, Value};
use super::traits::{Counted, Entity, Insertable};
use crate::entities::{Article, Counter, NewArticle, ObjectType};

impl Entity for Article {
    const TABLE: &'static str = "articles";
    const NAME: &'static str = "article";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "content",
        "category_id",
        "likes",
        "views",
        "created_at",
        "updated_at",
        "deleted_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Insertable<Article> for NewArticle {
    fn values(&self) -> FieldMap {
        vec![
            ("title", Value::from(self.title.as_str())),
            ("content", Value::from(self.content.as_str())),
            ("category_id", Value::from(self.category_id)),
        ]
    }
}

impl Counted for Article {
    const OBJECT_TYPE: ObjectType = ObjectType::Article;

    fn counter(&self, counter: Counter) -> Option<i64> {
        match counter {
            Counter::Likes => Some(self.likes),
            Counter::Views => Some(self.views),
        }
    }

    fn supports(_counter: Counter) -> bool {
        true
    }
}
