//! Admin users endpoint: authenticate, fetch the user list, refresh the token.

use crate::crypto::{Claims, TokenCodec};
use crate::errors::UsersError;
use crate::models::UserListResponse;
use crate::policy::{AdminPolicy, Rejection};
use crate::repositories::UserStore;
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use std::sync::Arc;
use tracing::instrument;

/// Application state shared across handlers.
///
/// Built once at startup and immutable thereafter; concurrent requests read
/// it without synchronization.
pub struct AppState {
    pub codec: TokenCodec,
    pub policy: AdminPolicy,
    pub store: Arc<dyn UserStore>,
}

/// Handle the admin user-list request.
///
/// GET /api/v1/admin/users
///
/// Pipeline: extract bearer token, decode, authorize, fetch users, reissue
/// the token with a rotated expiry. Every step is terminal on failure; no
/// retries.
#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserListResponse>, UsersError> {
    let token = extract_bearer_token(&headers)?;

    let claims = state
        .codec
        .decode(token)
        .map_err(|_| UsersError::DecodeFailed)?;

    // One reference timestamp for both the expiry check and the reissue.
    let now_ms = chrono::Utc::now().timestamp_millis();

    state.policy.evaluate(&claims, now_ms).map_err(|r| match r {
        Rejection::UnauthorizedIdentity => UsersError::UnauthorizedIdentity,
        Rejection::Expired => UsersError::TokenExpired,
    })?;

    let users = state
        .store
        .get_users()
        .await
        .map_err(|e| UsersError::Fetch(e.to_string()))?;

    // Rotated expiry is a multiplicative extension of the current timestamp,
    // matching the tokens already in circulation.
    let next_claims = Claims {
        listener_id: claims.listener_id,
        expires: now_ms * 1000,
    };

    let token = state
        .codec
        .encode(&next_claims)
        .map_err(|e| UsersError::Reissue(e.to_string()))?;

    tracing::debug!(
        target: "users.handlers",
        user_count = users.len(),
        "Admin user list served with refreshed token"
    );

    Ok(Json(UserListResponse { users, token }))
}

/// Handle the pre-flight probe.
///
/// OPTIONS /api/v1/admin/users
///
/// No authentication; returns 200 with an empty body.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Extract the bearer token from the Authorization header.
///
/// The credential must be exactly two whitespace-separated parts; the second
/// is the token. The scheme word is not inspected, matching the tokens'
/// previous consumers.
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, UsersError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or(UsersError::MissingAuthorization)?;

    let parts: Vec<&str> = auth_header.split(' ').collect();
    match parts.as_slice() {
        [_scheme, token] if !token.is_empty() => Ok(token),
        _ => Err(UsersError::InvalidAuthorization),
    }
}
