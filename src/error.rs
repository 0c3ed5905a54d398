use axum::extract::multipart::{MultipartError, MultipartRejection};
use http::StatusCode;
use thiserror::Error;

use crate::upload::DocumentSlot;

/// Errors that can occur while receiving and checking an upload request.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// Declared content type is not on the allow-list (maps to HTTP 415)
    #[error("O arquivo {label} ({filename}) deve ser PDF ou DOCX.")]
    UnsupportedMediaType {
        label: String,
        filename: String,
        content_type: Option<String>,
    },

    /// A required file part is absent from the form (maps to HTTP 422)
    #[error("Campo obrigatório ausente: {field}")]
    MissingField { field: &'static str },

    /// The request body could not be read in full
    #[error("Falha ao ler o corpo da requisição: {message}")]
    Read { status: StatusCode, message: String },
}

impl UploadError {
    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            UploadError::Read { status, .. } => *status,
        }
    }
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::Read {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

/// A body that is not `multipart/form-data` is read as an empty form, so the
/// first required part is reported missing.
impl From<MultipartRejection> for UploadError {
    fn from(rejection: MultipartRejection) -> Self {
        match rejection {
            MultipartRejection::InvalidBoundary(_) => UploadError::MissingField {
                field: DocumentSlot::Dod.field_name(),
            },
            other => UploadError::Read {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}
