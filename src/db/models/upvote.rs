use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Upvote models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::upvotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Upvote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roadmap_item_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::upvotes)]
pub struct NewUpvote {
    pub user_id: Uuid,
    pub roadmap_item_id: Uuid,
}
