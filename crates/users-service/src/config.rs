use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub redis_url: String,
    /// Symmetric signing secret. Wrapped in `SecretString` so it is redacted
    /// in Debug output and zeroized on drop.
    pub jwt_secret: SecretString,
    /// The single listener id authorized to call the admin endpoint.
    pub admin_listener_id: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Empty value for environment variable: {0}")]
    EmptyEnvVar(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8083".to_string());

        let redis_url = require(vars, "REDIS_URL")?;
        let jwt_secret = SecretString::from(require(vars, "JWT_SECRET")?);
        let admin_listener_id = require(vars, "ADMIN_LISTENER_ID")?;

        Ok(Config {
            bind_address,
            redis_url,
            jwt_secret,
            admin_listener_id,
        })
    }
}

fn require(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    let value = vars
        .get(name)
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;

    if value.is_empty() {
        return Err(ConfigError::EmptyEnvVar(name.to_string()));
    }

    Ok(value.clone())
}
