use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::comment::{CommentNode, NewComment},
    db::repositories::auth::UserRepo,
    db::repositories::comments::CommentRepo,
    db::repositories::roadmap_items::RoadmapItemRepo,
    error::AppError,
    services::comment_tree::{self, MAX_REPLY_DEPTH},
    services::context::RequestContext,
    validation::comment::validate_comment_content,
};

pub struct CommentsService;

impl CommentsService {
    /// Top-level comments of an item, replies nested up to the depth limit.
    pub fn list_top_level(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        roadmap_id: Uuid,
    ) -> Result<Vec<CommentNode>, AppError> {
        Self::ensure_item_exists(conn, roadmap_id)?;
        let rows = CommentRepo::list_for_item(conn, roadmap_id)
            .map_err(|e| AppError::internal(format!("Failed to list comments: {}", e)))?;
        Ok(comment_tree::build_forest(&rows, Some(ctx.user_id)))
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        roadmap_id: Uuid,
        content: String,
        parent: Option<Uuid>,
    ) -> Result<CommentNode, AppError> {
        validate_comment_content(&content)?;
        Self::ensure_item_exists(conn, roadmap_id)?;

        let rows = CommentRepo::list_for_item(conn, roadmap_id)
            .map_err(|e| AppError::internal(format!("Failed to load comments: {}", e)))?;

        // The reply target must live on the same item; a parent elsewhere is
        // treated as absent.
        let parent_level = match parent {
            Some(parent_id) => {
                if !rows.iter().any(|(c, _)| c.id == parent_id) {
                    return Err(AppError::validation("Parent comment not found"));
                }
                let level = comment_tree::nesting_level(&rows, parent_id);
                if level >= MAX_REPLY_DEPTH {
                    return Err(AppError::validation(
                        "Cannot reply to comments nested more than 2 levels deep",
                    ));
                }
                Some(level)
            }
            None => None,
        };

        let new_comment = NewComment {
            roadmap_item_id: roadmap_id,
            user_id: ctx.user_id,
            content,
            parent_id: parent,
        };
        let comment = CommentRepo::insert(conn, &new_comment)
            .map_err(|e| AppError::internal(format!("Failed to create comment: {}", e)))?;

        let author = UserRepo::find_by_id(conn, ctx.user_id)
            .map_err(|e| AppError::internal(format!("Failed to load author: {}", e)))?
            .ok_or_else(|| AppError::internal("Comment author missing"))?;

        Ok(CommentNode {
            id: comment.id,
            content: comment.content,
            user: (&author).into(),
            parent: comment.parent_id,
            roadmap_item: comment.roadmap_item_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            nesting_level: parent_level.map_or(0, |l| l + 1),
            can_edit: true,
            replies: Vec::new(),
        })
    }

    pub fn retrieve(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<CommentNode, AppError> {
        let comment = Self::find_owned(conn, ctx, comment_id)?;
        Self::serialize_in_item(conn, ctx, comment.roadmap_item_id, comment_id)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
        content: String,
    ) -> Result<CommentNode, AppError> {
        validate_comment_content(&content)?;
        let comment = Self::find_owned(conn, ctx, comment_id)?;

        CommentRepo::update_content(conn, comment_id, content)
            .map_err(|e| AppError::internal(format!("Failed to update comment: {}", e)))?;

        Self::serialize_in_item(conn, ctx, comment.roadmap_item_id, comment_id)
    }

    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let comment = Self::find_owned(conn, ctx, comment_id)?;

        CommentRepo::delete(conn, comment.id)
            .map_err(|e| AppError::internal(format!("Failed to delete comment: {}", e)))?;

        Ok(())
    }

    /// Every comment the user has authored, at any depth, serialized with its
    /// replies and true nesting level.
    pub fn list_by_author(
        conn: &mut PgConnection,
        ctx: &RequestContext,
    ) -> Result<Vec<CommentNode>, AppError> {
        let authored = CommentRepo::list_by_author(conn, ctx.user_id)
            .map_err(|e| AppError::internal(format!("Failed to list comments: {}", e)))?;

        let mut item_ids: Vec<Uuid> = authored.iter().map(|c| c.roadmap_item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();

        let rows = CommentRepo::list_for_items(conn, &item_ids)
            .map_err(|e| AppError::internal(format!("Failed to load comments: {}", e)))?;

        Ok(authored
            .iter()
            .filter_map(|c| comment_tree::serialize_one(&rows, Some(ctx.user_id), c.id))
            .collect())
    }

    fn find_owned(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        comment_id: Uuid,
    ) -> Result<crate::db::models::comment::Comment, AppError> {
        CommentRepo::find_owned(conn, comment_id, ctx.user_id)
            .map_err(|e| AppError::internal(format!("Failed to find comment: {}", e)))?
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    fn serialize_in_item(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        roadmap_id: Uuid,
        comment_id: Uuid,
    ) -> Result<CommentNode, AppError> {
        let rows = CommentRepo::list_for_item(conn, roadmap_id)
            .map_err(|e| AppError::internal(format!("Failed to load comments: {}", e)))?;
        comment_tree::serialize_one(&rows, Some(ctx.user_id), comment_id)
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    fn ensure_item_exists(conn: &mut PgConnection, roadmap_id: Uuid) -> Result<(), AppError> {
        RoadmapItemRepo::find_by_id(conn, roadmap_id)
            .map_err(|e| AppError::internal(format!("Failed to find roadmap item: {}", e)))?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Roadmap item"))
    }
}
