use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    db::models::{api::ApiResponse, auth::AuthUser},
    services::{context::RequestContext, upvotes_service::UpvotesService},
    validation::ValidatedJson,
};

#[derive(Debug, Deserialize, Validate)]
pub struct UpvoteRequest {
    pub roadmap_item: Uuid,
}

pub async fn create_upvote(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpvoteRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match UpvotesService::create(&mut conn, &ctx, payload.roadmap_item) {
        Ok(upvote) => {
            tracing::info!(roadmap_item = %upvote.roadmap_item_id, "upvote recorded");
            let response = ApiResponse::created(upvote, "Upvote recorded successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
