//! Main application router.

use crate::{
    controllers::{
        accessory_controller, auth_controller, health_controller, pipe_controller,
        review_controller, search_controller, stats_controller, tobacco_controller,
    },
    middleware::session_middleware,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use briar_config::{ServerConfig, UploadsConfig};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    uploads_config: &UploadsConfig,
) -> Router {
    let cors = create_cors_layer(server_config);

    // Every API route sits behind the session resolver; the extractors
    // decide which of them actually require a session.
    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest(
            "/pipes",
            pipe_controller::router().merge(review_controller::pipe_review_router()),
        )
        .nest(
            "/tobaccos",
            tobacco_controller::router().merge(review_controller::tobacco_review_router()),
        )
        .nest("/accessories", accessory_controller::router())
        .nest("/reviews", review_controller::moderation_router())
        .nest("/search", search_controller::router())
        .nest("/stats", stats_controller::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .nest_service(
            uploads_config.public_prefix.as_str(),
            ServeDir::new(&uploads_config.dir),
        )
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!(
        "Router created, uploads served from {} at {}",
        uploads_config.dir, uploads_config.public_prefix
    );
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}
