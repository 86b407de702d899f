use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::auth::User;
use crate::db::models::comment::{Comment, NewComment};

pub struct CommentRepo;

impl CommentRepo {
    /// All comments on an item with their authors, oldest first. Tree
    /// assembly happens in `services::comment_tree`.
    pub fn list_for_item(
        conn: &mut PgConnection,
        item_id: Uuid,
    ) -> Result<Vec<(Comment, User)>, diesel::result::Error> {
        use crate::schema::{comments, users};
        comments::table
            .inner_join(users::table)
            .filter(comments::roadmap_item_id.eq(item_id))
            .order(comments::created_at.asc())
            .select((Comment::as_select(), User::as_select()))
            .load(conn)
    }

    pub fn list_for_items(
        conn: &mut PgConnection,
        item_ids: &[Uuid],
    ) -> Result<Vec<(Comment, User)>, diesel::result::Error> {
        use crate::schema::{comments, users};
        comments::table
            .inner_join(users::table)
            .filter(comments::roadmap_item_id.eq_any(item_ids))
            .order(comments::created_at.asc())
            .select((Comment::as_select(), User::as_select()))
            .load(conn)
    }

    pub fn list_by_author(
        conn: &mut PgConnection,
        author_id: Uuid,
    ) -> Result<Vec<Comment>, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        comments
            .filter(user_id.eq(author_id))
            .order(created_at.asc())
            .select(Comment::as_select())
            .load(conn)
    }

    /// Ownership filter at the query level: a comment owned by someone else
    /// is indistinguishable from a missing one.
    pub fn find_owned(
        conn: &mut PgConnection,
        comment_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Comment>, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        comments
            .filter(id.eq(comment_id))
            .filter(user_id.eq(owner_id))
            .select(Comment::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_comment: &NewComment,
    ) -> Result<Comment, diesel::result::Error> {
        diesel::insert_into(crate::schema::comments::table)
            .values(new_comment)
            .get_result(conn)
    }

    pub fn update_content(
        conn: &mut PgConnection,
        comment_id: Uuid,
        new_content: String,
    ) -> Result<Comment, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        diesel::update(comments.filter(id.eq(comment_id)))
            .set((content.eq(new_content), updated_at.eq(chrono::Utc::now())))
            .get_result(conn)
    }

    /// Descendant replies go with the row via the self-referencing cascade.
    pub fn delete(
        conn: &mut PgConnection,
        comment_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::comments::dsl::*;
        diesel::delete(comments.filter(id.eq(comment_id))).execute(conn)
    }
}
