//! Router configuration for the upload gateway.
//!
//! This module defines the HTTP routes and applies middleware for authentication,
//! body size limits and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /health                    - Health check (public)
//! /api/v1/docs-principais    - Document upload (Basic auth)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use upload_gateway::server::routes::{create_router, RouterConfig};
//!
//! let config = RouterConfig::new("admin", "s3cret").with_max_body_size(10 * 1024 * 1024);
//!
//! let router = create_router(config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, router).await?;
//! ```

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::auth::{basic_auth_middleware, BasicAuth};
use super::handlers::{health_handler, upload_handler};

/// Path of the document upload endpoint.
pub const UPLOAD_PATH: &str = "/api/v1/docs-principais";

/// Default maximum request body size (50 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Expected Basic auth username
    pub username: String,

    /// Expected Basic auth password
    pub password: String,

    /// Maximum accepted request body size in bytes
    pub max_body_size: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given credential pair.
    ///
    /// By default:
    /// - Body limit is 50 MiB
    /// - Tracing is enabled
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            enable_tracing: true,
        }
    }

    /// Set the maximum request body size in bytes.
    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (health check)
/// - The upload route behind Basic auth and the body size limit
/// - Request tracing (optional)
pub fn create_router(config: RouterConfig) -> Router {
    let auth = BasicAuth::new(&config.username, &config.password);

    // route_layer keeps unknown paths at 404 instead of 401
    let upload_routes = Router::new()
        .route(UPLOAD_PATH, post(upload_handler))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .route_layer(middleware::from_fn_with_state(auth, basic_auth_middleware));

    let public_routes = Router::new().route("/health", get(health_handler));

    let router = Router::new()
        .merge(upload_routes)
        .merge(public_routes);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

// =============================================================================
// Tests
// =============================================================================
