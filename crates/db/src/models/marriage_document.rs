//! Marriage document metadata model and DTOs.
//!
//! The file itself lives in the upload directory under `file_path`.

use ccb_core::documents::download_url;
use ccb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// A row from the `marriage_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarriageDocument {
    pub id: DbId,
    pub marriage_id: DbId,
    pub document_type: Option<String>,
    /// Name of the file as uploaded.
    pub file_name: String,
    /// Stored name, relative to the upload directory.
    pub file_path: String,
    pub file_size: i64,
    pub uploaded_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A document row plus the URL it can be downloaded from.
#[derive(Debug, Clone, Serialize)]
pub struct MarriageDocumentWithUrl {
    #[serde(flatten)]
    pub document: MarriageDocument,
    pub download_url: String,
}

impl From<MarriageDocument> for MarriageDocumentWithUrl {
    fn from(document: MarriageDocument) -> Self {
        let download_url = download_url(&document.file_path);
        Self {
            document,
            download_url,
        }
    }
}

/// Metadata recorded after an upload has been written to disk.
#[derive(Debug, Clone)]
pub struct CreateMarriageDocument {
    pub marriage_id: DbId,
    pub document_type: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
}

/// DTO for updating document metadata. The stored file cannot be replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMarriageDocument {
    pub marriage_id: Option<DbId>,
    pub document_type: Option<String>,
    pub file_name: Option<String>,
}

impl Changeset for UpdateMarriageDocument {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("marriage_id", &self.marriage_id)
            .set("document_type", &self.document_type)
            .set("file_name", &self.file_name);
    }
}
