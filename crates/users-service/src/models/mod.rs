//! Data models shared across handlers and the store layer.

use serde::{Deserialize, Serialize};

/// A user record as stored in the key-value store (JSON under `user:{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub listener_id: String,
    pub display_name: String,
    /// Registration timestamp (milliseconds since epoch, UTC).
    pub created_at: i64,
}

/// Success payload for the admin users endpoint: the full user list plus the
/// refreshed bearer token the caller should use from now on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
    pub token: String,
}
