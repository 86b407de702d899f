use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    db::models::{api::ApiResponse, auth::AuthUser},
    services::{comments_service::CommentsService, context::RequestContext},
    validation::ValidatedJson,
};

// No field rules; content limits live in validation::comment. The extractor
// still maps malformed bodies to a 400 envelope instead of axum's 422.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    pub content: String,
}

pub async fn get_comments(
    State(state): State<Arc<AppState>>,
    Path(roadmap_id): Path<Uuid>,
    user: AuthUser,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match CommentsService::list_top_level(&mut conn, &ctx, roadmap_id) {
        Ok(comments) => {
            let response = ApiResponse::success(comments, "Comments retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(roadmap_id): Path<Uuid>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match CommentsService::create(&mut conn, &ctx, roadmap_id, payload.content, payload.parent) {
        Ok(comment) => {
            let response = ApiResponse::created(comment, "Comment created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<Uuid>,
    user: AuthUser,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match CommentsService::retrieve(&mut conn, &ctx, comment_id) {
        Ok(comment) => {
            let response = ApiResponse::success(comment, "Comment retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<Uuid>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateCommentRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match CommentsService::update(&mut conn, &ctx, comment_id, payload.content) {
        Ok(comment) => {
            let response = ApiResponse::success(comment, "Comment updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<Uuid>,
    user: AuthUser,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match CommentsService::delete(&mut conn, &ctx, comment_id) {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Comment deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
