use diesel::prelude::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    db::models::auth::User,
    db::models::comment::Comment,
    db::models::roadmap::{RoadmapItem, RoadmapItemDetail, RoadmapSort},
    db::repositories::comments::CommentRepo,
    db::repositories::roadmap_items::RoadmapItemRepo,
    db::repositories::upvotes::UpvoteRepo,
    error::AppError,
    services::comment_tree,
};

pub struct RoadmapService;

impl RoadmapService {
    pub fn list(
        conn: &mut PgConnection,
        viewer: Option<Uuid>,
        sort: RoadmapSort,
    ) -> Result<Vec<RoadmapItemDetail>, AppError> {
        let mut items = RoadmapItemRepo::list(conn, sort)
            .map_err(|e| AppError::internal(format!("Failed to list roadmap items: {}", e)))?;

        let counts: HashMap<Uuid, i64> = UpvoteRepo::counts_by_item(conn)
            .map_err(|e| AppError::internal(format!("Failed to count upvotes: {}", e)))?
            .into_iter()
            .collect();

        if sort == RoadmapSort::Popularity {
            // Items arrive newest-first, so equal counts keep that order.
            order_by_popularity(&mut items, &counts);
        }

        let upvoted: HashSet<Uuid> = match viewer {
            Some(user_id) => UpvoteRepo::item_ids_for_user(conn, user_id)
                .map_err(|e| AppError::internal(format!("Failed to load upvotes: {}", e)))?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        let item_ids: Vec<Uuid> = items.iter().map(|item| item.id).collect();
        let comment_rows = CommentRepo::list_for_items(conn, &item_ids)
            .map_err(|e| AppError::internal(format!("Failed to load comments: {}", e)))?;
        let mut comments_by_item: HashMap<Uuid, Vec<(Comment, User)>> = HashMap::new();
        for row in comment_rows {
            comments_by_item
                .entry(row.0.roadmap_item_id)
                .or_default()
                .push(row);
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let rows = comments_by_item.remove(&item.id).unwrap_or_default();
                let upvote_count = counts.get(&item.id).copied().unwrap_or(0);
                let user_has_upvoted = upvoted.contains(&item.id);
                Self::detail(item, upvote_count, user_has_upvoted, &rows, viewer)
            })
            .collect())
    }

    pub fn retrieve(
        conn: &mut PgConnection,
        viewer: Option<Uuid>,
        item_id: Uuid,
    ) -> Result<RoadmapItemDetail, AppError> {
        let item = RoadmapItemRepo::find_by_id(conn, item_id)
            .map_err(|e| AppError::internal(format!("Failed to find roadmap item: {}", e)))?
            .ok_or_else(|| AppError::not_found("Roadmap item"))?;

        let upvote_count = UpvoteRepo::count_for_item(conn, item_id)
            .map_err(|e| AppError::internal(format!("Failed to count upvotes: {}", e)))?;

        let user_has_upvoted = match viewer {
            Some(user_id) => UpvoteRepo::has_upvoted(conn, user_id, item_id)
                .map_err(|e| AppError::internal(format!("Failed to check upvote: {}", e)))?,
            None => false,
        };

        let rows = CommentRepo::list_for_item(conn, item_id)
            .map_err(|e| AppError::internal(format!("Failed to load comments: {}", e)))?;

        Ok(Self::detail(
            item,
            upvote_count,
            user_has_upvoted,
            &rows,
            viewer,
        ))
    }

    fn detail(
        item: RoadmapItem,
        upvote_count: i64,
        user_has_upvoted: bool,
        comment_rows: &[(Comment, User)],
        viewer: Option<Uuid>,
    ) -> RoadmapItemDetail {
        RoadmapItemDetail {
            id: item.id,
            title: item.title,
            description: item.description,
            status: item.status,
            created_at: item.created_at,
            upvote_count,
            user_has_upvoted,
            comments: comment_tree::build_forest(comment_rows, viewer),
        }
    }
}

/// Upvote count descending, ties broken by creation time descending.
pub fn order_by_popularity(items: &mut [RoadmapItem], counts: &HashMap<Uuid, i64>) {
    items.sort_by(|a, b| {
        let count_a = counts.get(&a.id).copied().unwrap_or(0);
        let count_b = counts.get(&b.id).copied().unwrap_or(0);
        count_b
            .cmp(&count_a)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
