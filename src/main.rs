use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tuning_backend::{config::Config, routes::create_router, storage::TransientStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tuning_backend=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Connect to database
    // The metadata tables (tuning_html_metadata, manuals) are an external
    // contract and must already exist; nothing is migrated here.
    let pool = tuning_backend::db::create_pool(&config.database).await?;
    info!("Database connection established");

    // Prepare the transient upload directory
    let storage = TransientStorage::new(&config.upload.dir);
    storage.ensure_dir().await?;
    info!("Transient storage ready at {:?}", config.upload.dir);

    // Create shared state
    let state = tuning_backend::AppState {
        pool,
        config: config.clone(),
        storage,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
