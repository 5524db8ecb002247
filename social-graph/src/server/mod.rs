// Server module - HTTP server setup and routing
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod state;

use std::net::SocketAddr;

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

use crate::errors::AppError;
use self::identity::IDENTITY_HEADERS;
use self::state::AppState;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/users/sync", post(handlers::sync_user))
        .route("/users/suggested", get(handlers::suggested_users))
        .route("/profiles/:external_id", get(handlers::get_profile))
        .route("/follows/:target_id", post(handlers::toggle_follow))
        .route("/posts", post(handlers::create_post))
        .route("/notifications", get(handlers::list_notifications))
        .route("/events/invalidations", get(handlers::invalidation_events))
        .layer(create_cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS for the configured origins; unparsable origins are skipped.
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let mut headers = vec![CONTENT_TYPE];
    headers.extend(IDENTITY_HEADERS.into_iter().map(HeaderName::from_static));

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::list(headers))
}

/// Run the server on the specified address until Ctrl+C or SIGTERM
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
