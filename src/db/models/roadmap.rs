use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::enums::RoadmapStatus;
use crate::db::models::comment::CommentNode;

// Roadmap item models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::roadmap_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoadmapItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::roadmap_items)]
pub struct NewRoadmapItem {
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
}

/// Full item serialization: the stored columns plus the derived upvote count,
/// the viewer's upvote flag, and the top-level comment tree.
#[derive(Serialize)]
pub struct RoadmapItemDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub upvote_count: i64,
    pub user_has_upvoted: bool,
    pub comments: Vec<CommentNode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoadmapSort {
    Recency,
    Popularity,
    Status,
}

impl RoadmapSort {
    /// Unknown or absent values fall back to recency.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("popularity") => RoadmapSort::Popularity,
            Some("status") => RoadmapSort::Status,
            _ => RoadmapSort::Recency,
        }
    }
}
