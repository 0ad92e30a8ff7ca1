//! Key-value store access layer.

pub mod users;

pub use users::{RedisUserStore, UserStore};
