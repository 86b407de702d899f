use axum::{Router, Server, middleware::from_fn};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use roadmap_backend::{AppState, db::DbPool, init_tracing};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config = roadmap_backend::config::Config::from_env().expect("Failed to load configuration");
    init_tracing(&config);

    let manager = DbConnectionManager::<PgConnection>::new(&config.database_url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(config.database_max_connections)
        .min_idle(Some(config.database_min_connections))
        .build(manager)
        .expect("Failed to create database connection pool");

    let addr = config
        .server_address()
        .parse()
        .expect("Invalid server address");

    let state = Arc::new(AppState::new(db, config));
    let pool = Arc::new(state.db.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Catalog routes resolve a session when one is present but never require
    // it; everything under protected_routes rejects without one.
    let catalog_routes = roadmap_backend::routes::catalog_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(
            pool.clone(),
            roadmap_backend::middleware::auth::optional_auth_middleware,
        ),
    );

    let protected_routes = roadmap_backend::routes::protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(
            pool,
            roadmap_backend::middleware::auth::auth_middleware,
        ),
    );

    let app = Router::new()
        .merge(roadmap_backend::routes::public_routes(state))
        .merge(catalog_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(from_fn(roadmap_backend::middleware::logger::logger));

    tracing::info!("Server running at http://{}", addr);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server error");
}
