use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::upvote::{NewUpvote, Upvote};

pub struct UpvoteRepo;

impl UpvoteRepo {
    /// Plain insert; the (user, item) uniqueness lives in the table
    /// constraint, so a concurrent duplicate surfaces as a unique violation
    /// rather than a second row.
    pub fn insert(
        conn: &mut PgConnection,
        new_upvote: &NewUpvote,
    ) -> Result<Upvote, diesel::result::Error> {
        diesel::insert_into(crate::schema::upvotes::table)
            .values(new_upvote)
            .get_result(conn)
    }

    pub fn counts_by_item(
        conn: &mut PgConnection,
    ) -> Result<Vec<(Uuid, i64)>, diesel::result::Error> {
        use crate::schema::upvotes::dsl::*;
        upvotes
            .group_by(roadmap_item_id)
            .select((roadmap_item_id, diesel::dsl::count_star()))
            .load(conn)
    }

    pub fn count_for_item(
        conn: &mut PgConnection,
        item_id: Uuid,
    ) -> Result<i64, diesel::result::Error> {
        use crate::schema::upvotes::dsl::*;
        upvotes
            .filter(roadmap_item_id.eq(item_id))
            .count()
            .get_result(conn)
    }

    pub fn item_ids_for_user(
        conn: &mut PgConnection,
        target_user_id: Uuid,
    ) -> Result<Vec<Uuid>, diesel::result::Error> {
        use crate::schema::upvotes::dsl::*;
        upvotes
            .filter(user_id.eq(target_user_id))
            .select(roadmap_item_id)
            .load(conn)
    }

    pub fn has_upvoted(
        conn: &mut PgConnection,
        target_user_id: Uuid,
        item_id: Uuid,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::upvotes::dsl::*;
        diesel::select(diesel::dsl::exists(
            upvotes
                .filter(user_id.eq(target_user_id))
                .filter(roadmap_item_id.eq(item_id)),
        ))
        .get_result(conn)
    }
}
