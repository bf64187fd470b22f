//! HTTP front end of the link store
//!
//! ## Routes
//! - `GET /links?userId=` list one user's rows, newest first
//! - `POST /links` add a row
//! - `DELETE /links?id=&userId=` delete one row of one user
//! - `GET /links/all`, `PUT /links/all` whole-collection access
//! - `GET /health`

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::error::{VaultError, VaultResult};
use crate::storage::Storage;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}

/// Build the API router
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/links",
            get(handlers::list_links)
                .post(handlers::add_link)
                .delete(handlers::delete_link),
        )
        .route(
            "/links/all",
            get(handlers::list_all_links).put(handlers::replace_links),
        )
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve `app` on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, app: Router) -> VaultResult<()> {
    let addr = listener
        .local_addr()
        .map_err(|e| VaultError::Io(format!("Failed to read listener address: {}", e)))?;

    info!("Link store listening on http://{}", addr);
    if addr.ip().is_unspecified() {
        warn!(
            "Link store reachable from the network; \
             user identifiers are unsalted password hashes, not credentials"
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| VaultError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down link store");
}
