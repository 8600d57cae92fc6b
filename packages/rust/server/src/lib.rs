//! HTTP API for Topicshelf.
//!
//! Exposes topic listings, topic details and search as JSON under `/api`,
//! and serves the built frontend for every other path when it exists.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use topicshelf_core::ContentRoot;
use topicshelf_markdown::RenderOptions;
use topicshelf_shared::{Result, ServeConfig, TopicshelfError};

pub use error::ApiError;
pub use handlers::AppState;

/// Build the application router for `config`.
pub fn router(config: &ServeConfig) -> Result<Router> {
    let content = ContentRoot::new(&config.content_dir).with_render_options(RenderOptions {
        allow_raw_html: config.allow_raw_html,
    });
    let state = AppState {
        content: Arc::new(content),
        max_results: config.max_results,
    };

    let api = Router::new()
        .route("/api/topics", get(handlers::list_topics))
        .route("/api/topics/", get(handlers::list_topics))
        .route("/api/topics/{*path}", get(handlers::get_topic))
        .route("/api/search", get(handlers::search))
        .route("/health", get(handlers::health))
        .with_state(state);

    let app = if config.frontend_dist.is_dir() {
        let index = config.frontend_dist.join("index.html");
        info!(dir = %config.frontend_dist.display(), "serving frontend");
        api.fallback_service(ServeDir::new(&config.frontend_dist).fallback(ServeFile::new(index)))
    } else {
        warn!(
            dir = %config.frontend_dist.display(),
            "frontend directory not found, serving API only"
        );
        api
    };

    Ok(app
        .layer(cors_layer(&config.cors_allow_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Bind `config.bind_addr` and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: ServeConfig) -> Result<()> {
    let app = router(&config)?;
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| TopicshelfError::Server(format!("failed to bind {}: {e}", config.bind_addr)))?;

    info!(
        content_dir = %config.content_dir.display(),
        bind_addr = %config.bind_addr,
        "topicshelf listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TopicshelfError::Server(e.to_string()))?;

    info!("server stopped");
    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let values = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| TopicshelfError::config(format!("invalid CORS origin '{origin}'")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(values)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
