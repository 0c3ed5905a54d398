//! Declared content type allow-list.
//!
//! Only the client-declared MIME string is checked. File contents are never
//! sniffed, so a mislabelled upload passes.

use crate::error::UploadError;

use super::UploadDescriptor;

/// MIME type for PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type for Office Open XML word-processing documents (.docx).
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Every content type accepted for any slot.
pub const ALLOWED_MEDIA_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];

/// Returns true if the declared content type is exactly one of the allowed values.
pub fn is_allowed_media_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ALLOWED_MEDIA_TYPES.contains(&ct))
}

/// Reject an upload whose declared content type is not PDF or DOCX.
///
/// `label` names the document in the error message.
pub fn check_media_type(upload: &UploadDescriptor, label: &str) -> Result<(), UploadError> {
    if is_allowed_media_type(upload.content_type()) {
        return Ok(());
    }

    Err(UploadError::UnsupportedMediaType {
        label: label.to_string(),
        filename: upload.filename().to_string(),
        content_type: upload.content_type().map(str::to_string),
    })
}
