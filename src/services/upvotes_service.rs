use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::{
    db::models::upvote::{NewUpvote, Upvote},
    db::repositories::upvotes::UpvoteRepo,
    error::AppError,
    services::context::RequestContext,
};

pub struct UpvotesService;

impl UpvotesService {
    /// Inserts directly and classifies the constraint violations, rather than
    /// checking for an existing row first. A pre-check would race with a
    /// concurrent duplicate; the unique constraint cannot.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        roadmap_item_id: Uuid,
    ) -> Result<Upvote, AppError> {
        let new_upvote = NewUpvote {
            user_id: ctx.user_id,
            roadmap_item_id,
        };

        UpvoteRepo::insert(conn, &new_upvote).map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::validation("You have already upvoted this item")
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                AppError::validation("Roadmap item does not exist")
            }
            // Persistence failures on this path surface as a 400 with the
            // underlying message.
            other => AppError::validation(other.to_string()),
        })
    }
}
