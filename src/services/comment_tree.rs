//! Depth-bounded assembly of comment forests.
//!
//! Comments on a roadmap item form a forest rooted at the comments without a
//! parent. A comment may only receive replies while its own depth is below
//! `MAX_REPLY_DEPTH`, and serialization cuts off at the same boundary: a
//! comment sitting at the limit serializes with an empty `replies` list even
//! if deeper rows exist in storage.

use std::collections::HashMap;
use uuid::Uuid;

use crate::db::models::auth::{AuthUser, User};
use crate::db::models::comment::{Comment, CommentNode};

/// Root = 0; comments at this depth cannot accept replies.
pub const MAX_REPLY_DEPTH: i32 = 2;

/// Distance from a comment to its root, following parent links all the way
/// up. A dangling or absent parent terminates the walk.
pub fn nesting_level(rows: &[(Comment, User)], comment_id: Uuid) -> i32 {
    let parent_of: HashMap<Uuid, Option<Uuid>> =
        rows.iter().map(|(c, _)| (c.id, c.parent_id)).collect();

    let mut level = 0;
    let mut current = parent_of.get(&comment_id).copied().flatten();
    while let Some(parent_id) = current {
        level += 1;
        current = parent_of.get(&parent_id).copied().flatten();
    }
    level
}

/// Serializes the top-level comments of an item, with replies nested up to
/// the depth limit. Row order (oldest first) is preserved at every level.
pub fn build_forest(rows: &[(Comment, User)], viewer: Option<Uuid>) -> Vec<CommentNode> {
    let children = child_index(rows);
    rows.iter()
        .enumerate()
        .filter(|(_, (comment, _))| comment.parent_id.is_none())
        .map(|(idx, _)| build_node(rows, &children, viewer, idx, 0))
        .collect()
}

/// Serializes a single comment at its true depth within the item's forest.
pub fn serialize_one(
    rows: &[(Comment, User)],
    viewer: Option<Uuid>,
    comment_id: Uuid,
) -> Option<CommentNode> {
    let idx = rows.iter().position(|(c, _)| c.id == comment_id)?;
    let children = child_index(rows);
    let depth = nesting_level(rows, comment_id);
    Some(build_node(rows, &children, viewer, idx, depth))
}

fn child_index(rows: &[(Comment, User)]) -> HashMap<Uuid, Vec<usize>> {
    let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
    for (idx, (comment, _)) in rows.iter().enumerate() {
        if let Some(parent_id) = comment.parent_id {
            children.entry(parent_id).or_default().push(idx);
        }
    }
    children
}

fn build_node(
    rows: &[(Comment, User)],
    children: &HashMap<Uuid, Vec<usize>>,
    viewer: Option<Uuid>,
    idx: usize,
    depth: i32,
) -> CommentNode {
    let (comment, author) = &rows[idx];

    // The depth check, not the data, bounds the recursion.
    let replies = if depth < MAX_REPLY_DEPTH {
        children
            .get(&comment.id)
            .map(|kids| {
                kids.iter()
                    .map(|&k| build_node(rows, children, viewer, k, depth + 1))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    CommentNode {
        id: comment.id,
        content: comment.content.clone(),
        user: AuthUser::from(author),
        parent: comment.parent_id,
        roadmap_item: comment.roadmap_item_id,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        nesting_level: depth,
        can_edit: viewer == Some(comment.user_id),
        replies,
    }
}
