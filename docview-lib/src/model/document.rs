//! Document record

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::CategoryRef;
use super::DocumentFile;
use super::DocumentId;
use super::FileVariant;
use super::TagRef;

/// A document as returned by the storage layer.
///
/// The view only ever holds transient copies taken from a fetch result. The
/// storage layer owns the document's lifecycle.
///
/// # Example
///
/// ```
/// use docview_lib::model::{CategoryRef, Document};
///
/// let doc = Document::new("42")
///     .with_title("Quarterly report")
///     .with_category(CategoryRef::new("reports"));
///
/// assert_eq!(doc.id.as_str(), "42");
/// assert!(doc.thumbnail().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category this document belongs to.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// Tags attached to the document.
    #[serde(default)]
    pub tags: Vec<TagRef>,
    /// File attachments, all variants.
    #[serde(default)]
    pub files: Vec<DocumentFile>,
    /// Free-form metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metainfo: serde_json::Value,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    /// User-facing document date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Document {
    /// Creates an empty document with the given id.
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            category: None,
            tags: Vec::new(),
            files: Vec::new(),
            metainfo: serde_json::Value::Null,
            created_at: None,
            modified_at: None,
            date: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }

    /// Adds a file attachment.
    pub fn with_file(mut self, file: DocumentFile) -> Self {
        self.files.push(file);
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Download URL of the first thumbnail file, if any.
    pub fn thumbnail(&self) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.variant == FileVariant::Thumbnail)
            .and_then(|file| file.download_url.as_deref())
    }

    /// Creation time of the newest original file.
    ///
    /// Returns `None` when the document has no original files.
    pub fn file_latest_created_at(&self) -> Option<DateTime<Utc>> {
        self.files
            .iter()
            .filter(|file| file.variant == FileVariant::Original)
            .map(|file| file.created_at)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_thumbnail_uses_first_thumbnail_variant() {
        let doc = Document::new("1")
            .with_file(DocumentFile::original("f1", "scan.pdf", at(8)))
            .with_file(DocumentFile::thumbnail("f2", "https://files/f2", at(9)))
            .with_file(DocumentFile::thumbnail("f3", "https://files/f3", at(10)));

        assert_eq!(doc.thumbnail(), Some("https://files/f2"));
    }

    #[test]
    fn test_thumbnail_missing() {
        let doc = Document::new("1").with_file(DocumentFile::original("f1", "scan.pdf", at(8)));
        assert_eq!(doc.thumbnail(), None);
    }

    #[test]
    fn test_file_latest_created_at_ignores_thumbnails() {
        let doc = Document::new("1")
            .with_file(DocumentFile::original("f1", "v1.pdf", at(8)))
            .with_file(DocumentFile::original("f2", "v2.pdf", at(11)))
            .with_file(DocumentFile::thumbnail("f3", "https://files/f3", at(12)));

        assert_eq!(doc.file_latest_created_at(), Some(at(11)));
    }

    #[test]
    fn test_file_latest_created_at_without_files() {
        assert_eq!(Document::new("1").file_latest_created_at(), None);
    }

    #[test]
    fn test_deserialize_minimal_document() {
        let json = r#"{"id": "7", "category": "reports", "tags": ["a", "b"]}"#;
        let doc: Document = serde_json::from_str(json).unwrap();

        assert_eq!(doc.id, DocumentId::new("7"));
        assert_eq!(doc.category, Some(CategoryRef::new("reports")));
        assert_eq!(doc.tags.len(), 2);
        assert!(doc.files.is_empty());
    }

    #[test]
    fn test_deserialize_unknown_file_variant() {
        let json = r#"{
            "id": "7",
            "files": [{"id": "f", "name": "x", "variant": "version", "created_at": "2024-03-01T08:00:00Z"}]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.files[0].variant, FileVariant::Other);
    }
}
