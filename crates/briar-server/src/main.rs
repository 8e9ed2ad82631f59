//! # Briar Catalog Server
//!
//! Main entry point for the Briar catalog backend. Wires Postgres, the
//! Redis cache layer, the in-memory session store, and the Axum router
//! into a single process.

use briar_config::{AppConfig, ConfigLoader, RedisConfig};
use briar_core::{BriarError, BriarResult};
use briar_repository::{
    create_pool, PgAccessoryRepository, PgCatalogQueryRepository, PgPipeRepository,
    PgReviewRepository, PgTobaccoRepository, PgUserRepository,
};
use briar_rest::{create_router, AppState};
use briar_security::{PasswordHasher, SessionStore};
use briar_service::cache::{Cache, RedisCacheBackend};
use briar_service::{
    AccessoryService, AuthService, ImageService, PipeService, ReviewService, SearchService,
    StatsService, TobaccoService,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Briar catalog server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> BriarResult<()> {
    let config = ConfigLoader::from_default_location().load()?;

    info!("Environment: {}", config.app.environment);

    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    let cache = Arc::new(build_cache(&config.redis)?);
    let state = build_state(&config, db_pool, cache);

    let router = create_router(state, &config.server, &config.uploads);

    let addr = config.server.addr();
    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BriarError::Internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BriarError::Internal(format!("Server error: {e}")))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the cache layer. A disabled cache serves every read straight
/// from Postgres, so a missing Redis never blocks startup.
fn build_cache(config: &RedisConfig) -> BriarResult<Cache> {
    if !config.enabled {
        warn!("Caching disabled by configuration");
        return Ok(Cache::disabled());
    }

    let pool = deadpool_redis::Config::from_url(&config.url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| BriarError::Configuration(format!("Invalid Redis config: {e}")))?;

    info!("Redis cache enabled at {}", config.url);
    Ok(Cache::new(Arc::new(RedisCacheBackend::new(Arc::new(
        pool,
    )))))
}

/// Wires repositories and services into the shared application state.
fn build_state(
    config: &AppConfig,
    db_pool: Arc<briar_repository::DatabasePool>,
    cache: Arc<Cache>,
) -> AppState {
    let pipes_repo = Arc::new(PgPipeRepository::new(db_pool.clone()));
    let tobaccos_repo = Arc::new(PgTobaccoRepository::new(db_pool.clone()));
    let accessories_repo = Arc::new(PgAccessoryRepository::new(db_pool.clone()));
    let reviews_repo = Arc::new(PgReviewRepository::new(db_pool.clone()));
    let users_repo = Arc::new(PgUserRepository::new(db_pool.clone()));
    let queries_repo = Arc::new(PgCatalogQueryRepository::new(db_pool));

    let hasher = PasswordHasher::with_cost(config.security.password_hash_cost);
    let sessions = SessionStore::new(config.security.session_ttl());

    AppState {
        pipes: Arc::new(PipeService::new(pipes_repo.clone(), cache.clone())),
        tobaccos: Arc::new(TobaccoService::new(tobaccos_repo.clone(), cache.clone())),
        accessories: Arc::new(AccessoryService::new(accessories_repo, cache.clone())),
        reviews: Arc::new(ReviewService::new(
            reviews_repo,
            pipes_repo,
            tobaccos_repo,
            cache.clone(),
        )),
        stats: Arc::new(StatsService::new(queries_repo.clone(), cache.clone())),
        search: Arc::new(SearchService::new(queries_repo, cache)),
        auth: Arc::new(AuthService::new(users_repo, hasher, sessions)),
        images: Arc::new(ImageService::new(config.uploads.clone())),
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,briar=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
