//! Feed API server implementation
//!
//! HTTP server using Axum. Serves the snapshot feed, the status stats, the
//! location catalog and the companion views.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::core::SnapshotExporter;
use crate::view::{Menu, MenuEntry, MenuRegistrar, ViewHost};

/// API Server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// A menu entry as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MenuLink {
    pub menu: String,
    pub label: String,
    pub path: String,
}

/// Collects menu entries as `/ui/<slug>` links when the server opens
#[derive(Debug, Default)]
pub struct RouteRegistrar {
    pub links: Vec<MenuLink>,
}

impl MenuRegistrar for RouteRegistrar {
    fn add_item(&mut self, menu_title: &str, entry: &MenuEntry) {
        self.links.push(MenuLink {
            menu: menu_title.to_string(),
            label: entry.label.clone(),
            path: format!("/ui/{}", entry.slug),
        });
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub exporter: Arc<SnapshotExporter>,
    pub views: Arc<dyn ViewHost>,
    pub menu: Menu,
    pub menu_links: Vec<MenuLink>,
}

impl AppState {
    /// Build the state and run the menu's open hook
    pub fn new(exporter: SnapshotExporter, views: Arc<dyn ViewHost>, menu: Menu) -> Self {
        let mut registrar = RouteRegistrar::default();
        menu.on_open(&mut registrar);

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exporter: Arc::new(exporter),
            views,
            menu,
            menu_links: registrar.links,
        }
    }
}

/// Install the global tracing subscriber (no-op if one is already set)
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the router. Kept apart from `run_api_server` so tests can drive it.
pub fn create_router(state: Arc<AppState>) -> Router {
    // The feed is a public endpoint consumed from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Feed endpoints
        .route("/api/v1/snapshot", get(handlers::snapshot))
        .route("/api/v1/stats", get(handlers::stats))
        .route("/api/v1/catalog", get(handlers::catalog))
        .route("/api/v1/menu", get(handlers::menu))
        // Companion views
        .route("/ui/:slug", get(handlers::open_view))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig, state: AppState) -> anyhow::Result<()> {
    init_tracing("sheetfeed=info,sheetfeed_server=info,tower_http=info");

    let app = create_router(Arc::new(state));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Sheetfeed API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/snapshot, /api/v1/stats, /api/v1/catalog, /api/v1/menu");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sheetfeed API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, stopping server...");
}
