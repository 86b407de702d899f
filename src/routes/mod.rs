pub mod auth;
pub mod comments;
pub mod roadmap;
pub mod upvotes;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Registration, login and the CSRF cookie endpoint; no auth middleware.
pub fn public_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/csrf/", get(auth::csrf))
        .with_state(state)
}

/// Read-only catalog routes; sit behind the optional-auth middleware so the
/// viewer's upvote flag and can_edit markers resolve when a session exists.
pub fn catalog_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/roadmap/", get(roadmap::get_items))
        .route("/roadmap/:roadmap_id/", get(roadmap::get_item))
        .with_state(state)
}

/// Everything that requires a session.
pub fn protected_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/logout/", post(auth::logout))
        .route("/profile/", get(auth::profile))
        .route(
            "/roadmap/:roadmap_id/comments/",
            get(comments::get_comments).post(comments::create_comment),
        )
        .route(
            "/comments/:comment_id/",
            get(comments::get_comment)
                .put(comments::update_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/upvote/", post(upvotes::create_upvote))
        .with_state(state)
}
