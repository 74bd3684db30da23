//! File attachments

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Which rendition of an upload a file record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileVariant {
    /// The file as uploaded.
    Original,
    /// A generated preview image.
    Thumbnail,
    /// Any variant this crate does not interpret.
    #[serde(other)]
    Other,
}

/// A file attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// File identifier.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Rendition held by this record.
    pub variant: FileVariant,
    /// Where the file can be downloaded from, if the storage layer exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// When the file was stored.
    pub created_at: DateTime<Utc>,
}

impl DocumentFile {
    /// Creates an original-variant file record.
    pub fn original(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variant: FileVariant::Original,
            download_url: None,
            created_at,
        }
    }

    /// Creates a thumbnail-variant file record.
    pub fn thumbnail(id: impl Into<String>, download_url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            variant: FileVariant::Thumbnail,
            download_url: Some(download_url.into()),
            created_at,
        }
    }

    /// Sets the download URL.
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }
}
