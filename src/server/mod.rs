//! HTTP server layer for the upload gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │               POST /api/v1/docs-principais                      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │    auth     │─►│  handlers   │  │        routes           │  │
//! │  │ (Basic auth)│  │  (upload)   │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{
    basic_auth_middleware, basic_header_value, parse_basic_header, AuthError, AuthenticatedUser,
    BasicAuth,
};
pub use handlers::{
    health_handler, upload_handler, ErrorResponse, HealthResponse, UploadResponse,
    SUCCESS_MESSAGE, SUCCESS_STATUS,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_BODY_SIZE, UPLOAD_PATH};
