use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bcrypt::{hash, verify};
use std::sync::Arc;
use tokio::task;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::{AuthUser, LoginRequest, NewSession, NewUser, ProfileResponse, RegisterRequest},
    },
    db::repositories::auth::{SessionRepo, UserRepo},
    middleware::auth::{CSRF_COOKIE, SESSION_COOKIE, generate_token, hash_token},
    services::{comments_service::CommentsService, context::RequestContext},
    validation::ValidatedJson,
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    match UserRepo::find_by_username(&mut conn, &payload.username) {
        Ok(Some(_)) => {
            let response =
                ApiResponse::<()>::bad_request("A user with that username already exists");
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
        Ok(None) => {}
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database error");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    }

    match UserRepo::find_by_email(&mut conn, &payload.email) {
        Ok(Some(_)) => {
            let response = ApiResponse::<()>::bad_request("A user with that email already exists");
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
        Ok(None) => {}
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database error");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    }

    let bcrypt_cost = state.config.bcrypt_cost;
    let password = payload.password.clone();
    let password_hash =
        match task::spawn_blocking(move || hash(password.as_bytes(), bcrypt_cost)).await {
            Ok(Ok(hashed)) => hashed,
            _ => {
                let response = ApiResponse::<()>::internal_error("Password processing error");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
            }
        };

    let new_user = NewUser {
        username: payload.username.clone(),
        email: payload.email.clone(),
        password_hash,
    };

    match UserRepo::insert(&mut conn, &new_user) {
        Ok(user) => {
            tracing::info!(username = %user.username, "user registered");
            let response =
                ApiResponse::created(AuthUser::from(&user), "User registered successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            // Pre-checks above race with concurrent registration; the unique
            // constraints do not.
            let response =
                ApiResponse::<()>::bad_request("A user with that username or email already exists");
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            let response = ApiResponse::<()>::internal_error("Failed to create user");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let user = match UserRepo::find_by_email(&mut conn, &payload.email) {
        Ok(Some(user)) => user,
        Ok(None) => {
            let response = ApiResponse::<()>::unauthorized("Invalid credentials");
            return (StatusCode::UNAUTHORIZED, Json(response)).into_response();
        }
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database error");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let password = payload.password.clone();
    let stored_hash = user.password_hash.clone();
    let password_valid =
        match task::spawn_blocking(move || verify(password.as_bytes(), &stored_hash)).await {
            Ok(Ok(valid)) => valid,
            _ => {
                let response = ApiResponse::<()>::internal_error("Password processing error");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
            }
        };

    if !password_valid {
        tracing::warn!(email = %payload.email, "failed login attempt");
        let response = ApiResponse::<()>::unauthorized("Invalid credentials");
        return (StatusCode::UNAUTHORIZED, Json(response)).into_response();
    }

    // Best-effort cleanup; a failed prune must not block the login.
    match SessionRepo::delete_expired(&mut conn) {
        Ok(pruned) if pruned > 0 => tracing::debug!(pruned, "pruned expired sessions"),
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to prune expired sessions: {}", e),
    }

    let token = generate_token();
    let new_session = NewSession {
        user_id: user.id,
        token_hash: hash_token(&token),
        expires_at: chrono::Utc::now()
            + chrono::Duration::seconds(state.config.session_ttl_seconds),
    };

    if let Err(e) = SessionRepo::insert(&mut conn, &new_session) {
        tracing::error!("Failed to create session: {}", e);
        let response = ApiResponse::<()>::internal_error("Failed to create session");
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
    }

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    tracing::info!(username = %user.username, "user logged in");
    let response = ApiResponse::success(AuthUser::from(&user), "Login successful");
    (StatusCode::OK, jar.add(cookie), Json(response)).into_response()
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    jar: CookieJar,
) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = SessionRepo::delete_by_token_hash(&mut conn, &hash_token(cookie.value())) {
            tracing::error!("Failed to delete session: {}", e);
            let response = ApiResponse::<()>::internal_error("Failed to delete session");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    }

    let mut removal = Cookie::named(SESSION_COOKIE);
    removal.set_path("/");
    let jar = jar.remove(removal);

    let response = ApiResponse::<()>::ok("Logout successful");
    (StatusCode::OK, jar, Json(response)).into_response()
}

pub async fn profile(State(state): State<Arc<AppState>>, user: AuthUser) -> impl IntoResponse {
    let mut conn = match state.db.get() {
        Ok(conn) => conn,
        Err(_) => {
            let response = ApiResponse::<()>::internal_error("Database connection failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
        }
    };

    let ctx = RequestContext { user_id: user.id };
    match CommentsService::list_by_author(&mut conn, &ctx) {
        Ok(comments) => {
            let response = ApiResponse::success(
                ProfileResponse { user, comments },
                "Profile retrieved successfully",
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Issues the CSRF cookie the browser client echoes back in a header. The
/// cookie is intentionally not HttpOnly; scripts must be able to read it.
pub async fn csrf(jar: CookieJar) -> impl IntoResponse {
    let cookie = Cookie::build(CSRF_COOKIE, generate_token())
        .path("/")
        .same_site(SameSite::Lax)
        .finish();

    let response = ApiResponse::<()>::ok("CSRF cookie set");
    (StatusCode::OK, jar.add(cookie), Json(response)).into_response()
}
