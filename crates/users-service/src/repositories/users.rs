//! User repository backed by Redis.
//!
//! # Key Pattern
//!
//! - `user:{listener_id}` - user record (JSON)
//!
//! # Connection Pattern
//!
//! The redis-rs `MultiplexedConnection` is designed to be cloned cheaply and
//! used concurrently. No locking is needed - just clone the connection for
//! each operation.

use crate::errors::StoreError;
use crate::models::UserRecord;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tracing::{error, instrument};

/// Narrow contract for user retrieval (enables fakes in tests).
///
/// The rest of the service treats the store as an opaque collaborator with
/// exactly this one operation.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch every user record.
    async fn get_users(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// Redis-backed user store.
///
/// Cheaply cloneable; the underlying `MultiplexedConnection` is shared across
/// requests without locking.
#[derive(Clone)]
pub struct RedisUserStore {
    connection: MultiplexedConnection,
}

impl RedisUserStore {
    /// Connect to Redis.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the client cannot be created or
    /// the connection cannot be established.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            // Do NOT log redis_url as it may contain credentials
            // (e.g., redis://:password@host:port)
            error!(
                target: "users.store",
                error = %e,
                "Failed to open Redis client"
            );
            StoreError::Connection(format!("Failed to open Redis client: {e}"))
        })?;

        let connection = client.get_multiplexed_async_connection().await.map_err(|e| {
            error!(
                target: "users.store",
                error = %e,
                "Failed to connect to Redis"
            );
            StoreError::Connection(format!("Failed to connect to Redis: {e}"))
        })?;

        Ok(Self { connection })
    }
}

#[async_trait::async_trait]
impl UserStore for RedisUserStore {
    /// Collect all `user:*` keys via SCAN, then MGET and decode each record.
    #[instrument(skip_all)]
    async fn get_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut conn = self.connection.clone();

        let keys: Vec<String> = {
            let mut iter = conn
                .scan_match::<_, String>("user:*")
                .await
                .map_err(|e| StoreError::Command(format!("Failed to scan user keys: {e}")))?;

            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|e| StoreError::Command(format!("Failed to fetch user records: {e}")))?;

        let mut users = Vec::with_capacity(values.len());
        for (key, value) in keys.iter().zip(values) {
            // A key can vanish between SCAN and MGET; that is not an error.
            let Some(json) = value else { continue };

            let record: UserRecord = serde_json::from_str(&json)
                .map_err(|e| StoreError::CorruptRecord(format!("{key}: {e}")))?;
            users.push(record);
        }

        // SCAN order is unspecified; return a stable ordering.
        users.sort_by(|a, b| a.listener_id.cmp(&b.listener_id));

        Ok(users)
    }
}

/// Mock user store module for testing.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock user store for unit and integration testing.
    pub struct MockUserStore {
        users: Vec<UserRecord>,
        error_message: Option<String>,
        call_count: AtomicUsize,
    }

    impl MockUserStore {
        /// Create a mock that returns the given records.
        pub fn with_users(users: Vec<UserRecord>) -> Self {
            Self {
                users,
                error_message: None,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Create a mock that returns an empty list.
        pub fn empty() -> Self {
            Self::with_users(Vec::new())
        }

        /// Create a mock that fails every fetch with the given message.
        pub fn failing(message: impl Into<String>) -> Self {
            Self {
                users: Vec::new(),
                error_message: Some(message.into()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// Number of `get_users` calls made against this mock.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn get_users(&self) -> Result<Vec<UserRecord>, StoreError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if let Some(message) = &self.error_message {
                return Err(StoreError::Command(message.clone()));
            }

            Ok(self.users.clone())
        }
    }
}
