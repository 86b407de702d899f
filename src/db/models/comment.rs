use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::models::auth::AuthUser;

// Comment models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: Uuid,
    pub roadmap_item_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub roadmap_item_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
}

/// A comment serialized for the API, with its reply subtree embedded.
/// Replies are only ever populated while the comment sits above the reply
/// depth limit; see `services::comment_tree`.
#[derive(Serialize, Clone, Debug)]
pub struct CommentNode {
    pub id: Uuid,
    pub content: String,
    pub user: AuthUser,
    pub parent: Option<Uuid>,
    pub roadmap_item: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub nesting_level: i32,
    pub can_edit: bool,
    pub replies: Vec<CommentNode>,
}
