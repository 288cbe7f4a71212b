//! Engagement repository - Like e visualizzazioni
//!
//! `user_likes` e `user_views` condividono forma e vincolo di unicità; il
//! soft delete riscrive `object_type` con un suffisso casuale, liberando la
//! tripla (user_id, object_id, object_type) per un nuovo engagement.

use super::query::{FieldMap, Filter, Value};
use super::traits::{Engagement, Entity, Insertable, Tombstone};
use super::Repository;
use crate::core::error::StoreResult;
use crate::entities::{Counter, NewEngagement, ObjectType, UserLike, UserView};
use crate::lifecycle::tombstone::tombstoned;
use sqlx::SqliteConnection;
use tracing::instrument;

const ENGAGEMENT_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "object_id",
    "object_type",
    "created_at",
    "updated_at",
    "deleted_at",
];

impl Entity for UserLike {
    const TABLE: &'static str = "user_likes";
    const NAME: &'static str = "like";
    const COLUMNS: &'static [&'static str] = ENGAGEMENT_COLUMNS;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for UserView {
    const TABLE: &'static str = "user_views";
    const NAME: &'static str = "view";
    const COLUMNS: &'static [&'static str] = ENGAGEMENT_COLUMNS;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Tombstone for UserLike {
    const UNIQUE_COLUMNS: &'static [&'static str] = &["object_type"];

    fn tombstone_fields(&self, token: &str) -> FieldMap {
        vec![(
            "object_type",
            Value::Text(tombstoned(self.object_type.as_str(), token)),
        )]
    }
}

impl Tombstone for UserView {
    const UNIQUE_COLUMNS: &'static [&'static str] = &["object_type"];

    fn tombstone_fields(&self, token: &str) -> FieldMap {
        vec![(
            "object_type",
            Value::Text(tombstoned(self.object_type.as_str(), token)),
        )]
    }
}

impl Engagement for UserLike {
    const COUNTER: Counter = Counter::Likes;

    fn user_id(&self) -> i64 {
        self.user_id
    }
    fn object_id(&self) -> i64 {
        self.object_id
    }
    fn object_type(&self) -> ObjectType {
        self.object_type
    }
}

impl Engagement for UserView {
    const COUNTER: Counter = Counter::Views;

    fn user_id(&self) -> i64 {
        self.user_id
    }
    fn object_id(&self) -> i64 {
        self.object_id
    }
    fn object_type(&self) -> ObjectType {
        self.object_type
    }
}

fn engagement_values(data: &NewEngagement) -> FieldMap {
    vec![
        ("user_id", Value::from(data.user_id)),
        ("object_id", Value::from(data.object_id)),
        ("object_type", Value::from(data.object_type.as_str())),
    ]
}

impl Insertable<UserLike> for NewEngagement {
    fn values(&self) -> FieldMap {
        engagement_values(self)
    }
}

impl Insertable<UserView> for NewEngagement {
    fn values(&self) -> FieldMap {
        engagement_values(self)
    }
}

impl<E: Engagement> Repository<E> {
    /// The caller's active engagement with an object
    ///
    /// # Returns
    /// * `Err(StoreError::NotFound)` - No active row for the triple
    #[instrument(skip(self, conn), fields(table = E::TABLE))]
    pub async fn find_active(
        &self,
        conn: &mut SqliteConnection,
        user_id: i64,
        object_id: i64,
        object_type: ObjectType,
    ) -> StoreResult<E> {
        let filter = Filter::active()
            .eq("user_id", user_id)
            .eq("object_id", object_id)
            .eq("object_type", object_type.as_str());
        self.find_one(conn, &[], &filter).await
    }
}
