use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::MaybeAuthUser,
        roadmap::RoadmapSort,
    },
    services::roadmap_service::RoadmapService,
};

#[derive(Deserialize)]
pub struct RoadmapQuery {
    pub sort: Option<String>,
}

pub async fn get_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RoadmapQuery>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let sort = RoadmapSort::from_param(params.sort.as_deref());
    match RoadmapService::list(&mut conn, viewer.map(|u| u.id), sort) {
        Ok(items) => {
            let response = ApiResponse::success(items, "Roadmap items retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(roadmap_id): Path<Uuid>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match RoadmapService::retrieve(&mut conn, viewer.map(|u| u.id), roadmap_id) {
        Ok(item) => {
            let response = ApiResponse::success(item, "Roadmap item retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
