use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::auth::{NewSession, NewUser, Session, User};

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        target_id: Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(target_id))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(target_email))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(username.eq(target_username))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .get_result(conn)
    }
}

pub struct SessionRepo;

impl SessionRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_session: &NewSession,
    ) -> Result<Session, diesel::result::Error> {
        diesel::insert_into(crate::schema::sessions::table)
            .values(new_session)
            .get_result(conn)
    }

    /// Resolves a session token digest to its user, ignoring expired rows.
    pub fn find_user_by_token_hash(
        conn: &mut PgConnection,
        hash: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::{sessions, users};
        sessions::table
            .inner_join(users::table)
            .filter(sessions::token_hash.eq(hash))
            .filter(sessions::expires_at.gt(chrono::Utc::now()))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn delete_by_token_hash(
        conn: &mut PgConnection,
        hash: &str,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sessions::dsl::*;
        diesel::delete(sessions.filter(token_hash.eq(hash))).execute(conn)
    }

    /// Expired rows are already invisible to lookup; this reclaims them.
    /// Runs on login, which bounds the table without a background task.
    pub fn delete_expired(conn: &mut PgConnection) -> Result<usize, diesel::result::Error> {
        use crate::schema::sessions::dsl::*;
        diesel::delete(sessions.filter(expires_at.le(chrono::Utc::now()))).execute(conn)
    }
}
