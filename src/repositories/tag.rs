//! Tag repository

use super::query::{FieldMap, Value};
use super::traits::{Counted, Entity, Insertable, Tombstone};
use crate::entities::{Counter, NewTag, ObjectType, Tag};
use crate::lifecycle::tombstone::tombstoned;

impl Entity for Tag {
    const TABLE: &'static str = "tags";
    const NAME: &'static str = "tag";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "likes",
        "created_at",
        "updated_at",
        "deleted_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }
}

impl Insertable<Tag> for NewTag {
    fn values(&self) -> FieldMap {
        vec![("name", Value::from(self.name.as_str()))]
    }
}

impl Tombstone for Tag {
    const UNIQUE_COLUMNS: &'static [&'static str] = &["name"];

    fn tombstone_fields(&self, token: &str) -> FieldMap {
        vec![("name", Value::Text(tombstoned(&self.name, token)))]
    }
}

impl Counted for Tag {
    const OBJECT_TYPE: ObjectType = ObjectType::Tag;

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
