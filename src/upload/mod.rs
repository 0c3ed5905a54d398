//! Document upload model and checks.
//!
//! # Pipeline
//!
//! ```text
//! multipart body ──► UploadSet ──► DocumentBundle ──► ReceivedDocuments
//!                   (read parts)   (all 3 present,    (name + size per slot)
//!                                   types allowed)
//! ```
//!
//! Uploaded bytes stay in memory for the lifetime of the request and are
//! never written anywhere.

mod ingest;
mod media_type;
mod slot;

use bytes::Bytes;

pub use ingest::{receive_documents, DocumentBundle, FileSummary, ReceivedDocuments, UploadSet};
pub use media_type::{
    check_media_type, is_allowed_media_type, ALLOWED_MEDIA_TYPES, DOCX_MIME, PDF_MIME,
};
pub use slot::DocumentSlot;

/// One uploaded file as declared by the client.
#[derive(Debug, Clone)]
pub struct UploadDescriptor {
    slot: DocumentSlot,
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

impl UploadDescriptor {
    pub fn new(
        slot: DocumentSlot,
        filename: impl Into<String>,
        content_type: Option<String>,
        data: Bytes,
    ) -> Self {
        Self {
            slot,
            filename: filename.into(),
            content_type,
            data,
        }
    }

    pub fn slot(&self) -> DocumentSlot {
        self.slot
    }

    /// Label of the slot this file was uploaded into.
    pub fn label(&self) -> &'static str {
        self.slot.label()
    }

    /// Filename as sent by the client.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Content type as declared by the client, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Raw file bytes, as handed to downstream text extraction.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
