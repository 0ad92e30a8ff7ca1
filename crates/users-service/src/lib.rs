//! Users Service Library
//!
//! Administrative user-listing service for the Unwrapped system. A single
//! authenticated endpoint returns every user record from the key-value store
//! together with a refreshed bearer token.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Token codec (HMAC JWT encode/decode)
//! - `policy` - Admin identity and expiry checks
//! - `errors` - Error types
//! - `models` - Data models
//! - `repositories` - Key-value store access layer
//! - `handlers` - HTTP request handlers
//! - `routes` - Router construction

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod repositories;
pub mod routes;
