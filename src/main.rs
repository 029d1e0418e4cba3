use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vetauth::{
    app, AppState, CredentialConfig, CredentialService, CredentialStore, InMemoryCredentialStore,
    PostgresCredentialStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetauth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting credential service");

    let config = CredentialConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid credential configuration");
        e
    })?;
    info!(?config, "Loaded credential configuration");

    // PostgreSQL when DATABASE_URL is set, otherwise an in-memory store for development
    let store: Arc<dyn CredentialStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sqlx::PgPool::connect(&database_url).await.map_err(|e| {
                error!(error = %e, "Failed to connect to database");
                e
            })?;
            let store = PostgresCredentialStore::new(pool);
            store.migrate().await?;
            info!("Using PostgreSQL credential store");
            Arc::new(store)
        }
        Err(_) => {
            info!("DATABASE_URL not set, using in-memory credential store");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    let app_state = AppState::new(Arc::new(CredentialService::new(store, &config)));
    let app = app(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
