use secrecy::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users_service::config::Config;
use users_service::crypto::TokenCodec;
use users_service::handlers::AppState;
use users_service::policy::AdminPolicy;
use users_service::repositories::RedisUserStore;
use users_service::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Users Service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    // Connect to the key-value store
    info!("Connecting to Redis...");
    let store = RedisUserStore::connect(&config.redis_url).await.map_err(|e| {
        error!("Failed to connect to Redis: {}", e);
        e
    })?;

    info!("Redis connection established");

    // Create application state
    let state = Arc::new(AppState {
        codec: TokenCodec::new(config.jwt_secret.expose_secret().as_bytes()),
        policy: AdminPolicy::new(config.admin_listener_id.clone()),
        store: Arc::new(store),
    });

    // Build application routes
    let app = routes::build_routes(state);

    // Parse bind address
    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Users Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
