//! # Upload Gateway
//!
//! An authenticated HTTP endpoint that receives the three core procurement
//! documents (DOD, ETP and TR) in one multipart request, checks their declared
//! file types and reports the name and size of each file received.
//!
//! Uploaded bytes are held in memory for the duration of the request only.
//! Nothing is parsed or stored.
//!
//! ## Request Pipeline
//!
//! 1. **Credential gate**: HTTP Basic credentials compared in constant time
//!    against one configured pair (401 on mismatch)
//! 2. **Content type gate**: each document must be declared as PDF or DOCX
//!    (415 on the first that is not)
//! 3. **Ingestion**: all three files are read in full and summarised
//!
//! ## Architecture
//!
//! - [`upload`] - Document slots, upload descriptors and type checks
//! - [`server`] - Axum-based HTTP server, auth middleware and routes
//! - [`config`] - CLI and environment configuration
//! - [`error`] - Upload error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use upload_gateway::{create_router, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = create_router(RouterConfig::new("admin", "s3cret"));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use error::UploadError;
pub use server::{
    basic_auth_middleware, basic_header_value, create_router, health_handler, upload_handler,
    AuthError, AuthenticatedUser, BasicAuth, ErrorResponse, HealthResponse, RouterConfig,
    UploadResponse, UPLOAD_PATH,
};
pub use upload::{
    check_media_type, is_allowed_media_type, receive_documents, DocumentBundle, DocumentSlot,
    FileSummary, ReceivedDocuments, UploadDescriptor, UploadSet, ALLOWED_MEDIA_TYPES, DOCX_MIME,
    PDF_MIME,
};
