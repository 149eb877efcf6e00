use std::sync::Arc;

use studentapp_core::Store;
use studentapp_db::{init_pool, run_migrations, SqliteStore};
use studentapp_server::{create_router, shutdown_signal, telemetry, AppState, Config};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: DATABASE_URL (default: sqlite://studentapp.db)");
            eprintln!("Optional: STUDENTAPP_LISTEN_ADDR (default: 0.0.0.0:3000)");
            eprintln!("Optional: STUDENTAPP_MAX_CONNECTIONS, STUDENTAPP_LOG_FORMAT, STUDENTAPP_LOG_FILE");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let _log_guard = match telemetry::init_tracing(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to open log file: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting studentapp server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Database: {}", config.database_url);

    // Connect to database
    let pool = match init_pool(&config.database_url, config.max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database connection error: {}", e);
            std::process::exit(1);
        }
    };

    // Run migrations
    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Migration error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Database migrations completed");

    let store: Arc<dyn Store> = Arc::new(SqliteStore::new(pool));
    let app = create_router(AppState::new(store.clone()));

    // Start server
    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
    }

    tracing::info!("Shutting down, closing database connections");
    store.close().await;
}
