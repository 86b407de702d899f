use crate::db::DbPool;
use crate::db::models::auth::AuthUser;
use crate::db::repositories::auth::SessionRepo;
use axum::{
    extract::State,
    http::{HeaderMap, Request, StatusCode, header::COOKIE},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sessionid";
pub const CSRF_COOKIE: &str = "csrftoken";

/// 32 random bytes, hex encoded. Used for both session and CSRF tokens.
pub fn generate_token() -> String {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    hex::encode(bytes)
}

/// Sessions store only the SHA-256 digest of the cookie token, so a leaked
/// sessions table does not yield usable cookies.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key == name).then(|| val.to_string())
        })
        .next()
}

fn resolve_session(pool: &DbPool, token: &str) -> Option<AuthUser> {
    let mut conn = pool.get().ok()?;
    let hash = hash_token(token);
    SessionRepo::find_user_by_token_hash(&mut conn, &hash)
        .ok()
        .flatten()
        .map(|user| AuthUser::from(&user))
}

/// Rejects requests without a valid, unexpired session cookie and attaches
/// the resolved user to the request extensions.
pub async fn auth_middleware(
    State(pool): State<Arc<DbPool>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, StatusCode> {
    let token =
        read_cookie(request.headers(), SESSION_COOKIE).ok_or(StatusCode::UNAUTHORIZED)?;

    let user = resolve_session(&pool, &token).ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Like `auth_middleware` but never rejects; handlers see `Option<AuthUser>`.
pub async fn optional_auth_middleware(
    State(pool): State<Arc<DbPool>>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, StatusCode> {
    let user = read_cookie(request.headers(), SESSION_COOKIE)
        .and_then(|token| resolve_session(&pool, &token));

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
