use std::net::SocketAddr;

use biblioteca_api::config::ServerConfig;
use biblioteca_api::logging::init_tracing;
use biblioteca_api::router::build_app_router;
use biblioteca_api::state::AppState;
use biblioteca_core::seed::seed_books;
use biblioteca_db::bootstrap::bootstrap;
use biblioteca_db::store::open_store;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing("biblioteca_api=debug,biblioteca_db=debug,tower_http=debug");

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        environment = config.environment.key(),
        backend = config.backend.name(),
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = if config.backend.requires_database() {
        let database_url = config
            .database_url
            .as_deref()
            .expect("DATABASE_URL must be set for the database-backed catalog");

        let pool = biblioteca_db::create_pool(database_url, config.db_max_connections)
            .await
            .expect("Failed to connect to database");
        tracing::info!(max_connections = config.db_max_connections, "Database connection pool created");

        biblioteca_db::health_check(&pool)
            .await
            .expect("Database health check failed");
        tracing::info!("Database health check passed");

        Some(pool)
    } else {
        tracing::warn!("Using in-memory catalog, data is lost on exit");
        None
    };

    // --- Catalog ---
    let store = open_store(config.backend, config.environment, pool)
        .expect("Failed to open catalog store");

    let report = bootstrap(store.as_ref(), &seed_books(config.environment))
        .await
        .expect("Failed to bootstrap catalog");
    tracing::info!(
        table = %report.location,
        existing = report.existing,
        seeded = report.inserted,
        "Catalog ready",
    );

    // --- App state ---
    let state = AppState::new(store.clone(), config.clone());
    let profile = state.profile.clone();
    tracing::info!(
        environment = profile.name,
        badge = profile.badge_text,
        debug = profile.features.debug,
        analytics = profile.features.analytics,
        email_notifications = profile.features.email_notifications,
        auto_backup = profile.features.auto_backup,
        "Environment profile active",
    );

    if let Some(dir) = &config.static_dir {
        tracing::info!(static_dir = %dir.display(), "Serving static assets");
    }

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    store.close().await;
    tracing::info!("Catalog store closed");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
