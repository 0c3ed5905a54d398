//! HTTP request handlers for the upload gateway.
//!
//! # Endpoints
//!
//! - `POST /api/v1/docs-principais` - Receive the DOD, ETP and TR documents
//! - `GET /health` - Health check endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::UploadError;
use crate::upload::{receive_documents, ReceivedDocuments};

use super::auth::AuthenticatedUser;

/// Status marker of a successful upload response.
pub const SUCCESS_STATUS: &str = "sucesso";

/// Confirmation message of a successful upload response.
pub const SUCCESS_MESSAGE: &str = "Arquivos recepcionados com segurança.";

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "unsupported_media_type", "missing_field")
    pub error: String,

    /// Human-readable error message
    pub detail: String,

    /// HTTP status code (included for convenience)
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        detail: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            detail: detail.into(),
            status: status.as_u16(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Response from the document upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: String,

    /// Username that passed authentication
    #[serde(rename = "usuario_responsavel")]
    pub responsible_user: String,

    #[serde(rename = "mensagem")]
    pub message: String,

    /// Name and size of each received document
    #[serde(rename = "dados_recebidos")]
    pub received: ReceivedDocuments,
}

impl UploadResponse {
    /// Build the success response for an authenticated user.
    pub fn success(username: impl Into<String>, received: ReceivedDocuments) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            responsible_user: username.into(),
            message: SUCCESS_MESSAGE.to_string(),
            received,
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert UploadError to HTTP response.
///
/// - 4xx errors are logged at WARN level (client errors)
/// - 5xx errors are logged at ERROR level (server errors)
impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = match &self {
            UploadError::UnsupportedMediaType { .. } => "unsupported_media_type",
            UploadError::MissingField { .. } => "missing_field",
            UploadError::Read { .. } => "read_error",
        };
        let detail = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Upload failed: {}",
                detail
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Upload rejected: {}",
                detail
            );
        }

        let error_response = ErrorResponse::with_status(error_type, detail, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle document upload requests.
///
/// # Endpoint
///
/// `POST /api/v1/docs-principais`
///
/// # Request
///
/// `multipart/form-data` with three file parts: `dod`, `etp` and `tr`.
/// Each must be declared as `application/pdf` or as the DOCX MIME type.
/// Requires HTTP Basic authentication (enforced by middleware).
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "sucesso",
///   "usuario_responsavel": "admin",
///   "mensagem": "Arquivos recepcionados com segurança.",
///   "dados_recebidos": {
///     "dod": {"nome": "a.pdf", "tamanho": 120},
///     "etp": {"nome": "b.docx", "tamanho": 340},
///     "tr":  {"nome": "c.pdf", "tamanho": 75}
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Multipart body is malformed or truncated
/// - `401 Unauthorized`: Missing or wrong credentials (from middleware)
/// - `413 Payload Too Large`: Body exceeds the configured limit
/// - `415 Unsupported Media Type`: A document is not declared as PDF or DOCX
/// - `422 Unprocessable Entity`: A required document is missing (including
///   bodies that are not `multipart/form-data` at all)
pub async fn upload_handler(
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let documents = receive_documents(multipart?).await?;

    info!(
        user = user.username(),
        dod = %documents.dod.filename(),
        etp = %documents.etp.filename(),
        tr = %documents.tr.filename(),
        total_bytes = documents.total_bytes(),
        "Documents received"
    );

    Ok(Json(UploadResponse::success(
        user.username(),
        documents.summary(),
    )))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.2.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
