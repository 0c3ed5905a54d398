//! Reading the multipart form into upload descriptors.

use axum::extract::Multipart;
use axum::http::header;
use serde::Serialize;
use tracing::debug;

use crate::error::UploadError;

use super::media_type::check_media_type;
use super::slot::{DocumentSlot, SlotMap};
use super::UploadDescriptor;

// =============================================================================
// Upload Set
// =============================================================================

/// Uploads collected from a form, keyed by slot.
///
/// Slots may still be empty at this stage; [`UploadSet::into_documents`]
/// enforces that all three are present.
#[derive(Debug, Default)]
pub struct UploadSet {
    uploads: SlotMap<UploadDescriptor>,
}

impl UploadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an upload in its slot, returning any upload it replaced.
    pub fn insert(&mut self, upload: UploadDescriptor) -> Option<UploadDescriptor> {
        self.uploads.insert(upload.slot(), upload)
    }

    pub fn get(&self, slot: DocumentSlot) -> Option<&UploadDescriptor> {
        self.uploads.get(slot)
    }

    /// Read every part of a multipart body.
    ///
    /// File parts named after a slot are kept in full; other parts are
    /// skipped. A later part with the same name replaces an earlier one.
    /// Any read failure aborts the whole form.
    pub async fn read_multipart(mut multipart: Multipart) -> Result<Self, UploadError> {
        let mut set = Self::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(slot) = field.name().and_then(DocumentSlot::from_field_name) else {
                debug!(field = ?field.name(), "Skipping unknown form field");
                continue;
            };

            // A part without a filename is a plain form value, not a file.
            let Some(filename) = field.file_name().map(str::to_string) else {
                debug!(field = slot.field_name(), "Skipping non-file form field");
                continue;
            };

            // Raw header value; the parsed mime would lowercase what the client sent
            let content_type = field
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let data = field.bytes().await?;

            debug!(
                slot = slot.label(),
                document = slot.description(),
                filename = %filename,
                content_type = ?content_type,
                size = data.len(),
                "Received upload"
            );

            if set
                .insert(UploadDescriptor::new(slot, filename, content_type, data))
                .is_some()
            {
                debug!(slot = slot.label(), "Duplicate form field replaced earlier upload");
            }
        }

        Ok(set)
    }

    /// Require an upload in every slot, checked in DOD, ETP, TR order.
    pub fn into_documents(mut self) -> Result<DocumentBundle, UploadError> {
        let mut take = |slot: DocumentSlot| {
            self.uploads.take(slot).ok_or(UploadError::MissingField {
                field: slot.field_name(),
            })
        };

        Ok(DocumentBundle {
            dod: take(DocumentSlot::Dod)?,
            etp: take(DocumentSlot::Etp)?,
            tr: take(DocumentSlot::Tr)?,
        })
    }
}

// =============================================================================
// Document Bundle
// =============================================================================

/// The three uploads of a complete request.
#[derive(Debug, Clone)]
pub struct DocumentBundle {
    pub dod: UploadDescriptor,
    pub etp: UploadDescriptor,
    pub tr: UploadDescriptor,
}

impl DocumentBundle {
    /// Uploads in DOD, ETP, TR order.
    pub fn iter(&self) -> impl Iterator<Item = &UploadDescriptor> {
        [&self.dod, &self.etp, &self.tr].into_iter()
    }

    /// Check declared content types, failing on the first disallowed upload.
    pub fn check_media_types(&self) -> Result<(), UploadError> {
        self.iter()
            .try_for_each(|upload| check_media_type(upload, upload.label()))
    }

    pub fn total_bytes(&self) -> usize {
        self.iter().map(UploadDescriptor::len).sum()
    }

    /// Name and size of each upload.
    pub fn summary(&self) -> ReceivedDocuments {
        ReceivedDocuments {
            dod: FileSummary::from(&self.dod),
            etp: FileSummary::from(&self.etp),
            tr: FileSummary::from(&self.tr),
        }
    }
}

/// Read a multipart body and run it through the presence and content type checks.
pub async fn receive_documents(multipart: Multipart) -> Result<DocumentBundle, UploadError> {
    let documents = UploadSet::read_multipart(multipart).await?.into_documents()?;
    documents.check_media_types()?;
    Ok(documents)
}

// =============================================================================
// Summaries
// =============================================================================

/// Name and size of one received file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    #[serde(rename = "nome")]
    pub filename: String,

    #[serde(rename = "tamanho")]
    pub size: usize,
}

impl From<&UploadDescriptor> for FileSummary {
    fn from(upload: &UploadDescriptor) -> Self {
        Self {
            filename: upload.filename().to_string(),
            size: upload.len(),
        }
    }
}

/// Summary of all three received files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedDocuments {
    pub dod: FileSummary,
    pub etp: FileSummary,
    pub tr: FileSummary,
}

// =============================================================================
// Tests
// =============================================================================
