//! Collaborator traits.
//!
//! The view reaches storage, upload transport, notifications and
//! localization only through these traits. Implementations are injected as
//! `Arc<dyn Trait>`.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::error::UploadError;
use crate::model::CategoryRef;
use crate::model::Document;
use crate::query::QueryDescriptor;
use crate::upload::UploadFile;

/// Source of the document list.
///
/// Must return documents in the order requested by the descriptor's sort
/// token, with the requested relations populated.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Run a list query.
    async fn query(&self, query: &QueryDescriptor) -> Result<Vec<Document>, SourceError>;
}

/// Transport for dropped files.
///
/// All-or-nothing: `Ok` means every file was stored in the category.
#[async_trait]
pub trait UploadDelegate: Send + Sync {
    /// Upload files into a category.
    async fn upload(&self, category: &CategoryRef, files: &[UploadFile]) -> Result<(), UploadError>;
}

/// Sink for user-visible notifications. Fire and forget.
pub trait NotificationSink: Send + Sync {
    /// Show a success message.
    fn success(&self, message: String);

    /// Show an error message.
    fn danger(&self, message: String);
}

/// Localization lookup.
///
/// The core supplies a message key and a count; it never builds display
/// text itself.
pub trait Translator: Send + Sync {
    /// Resolve a key with a count parameter.
    fn translate(&self, key: &str, count: usize) -> String;
}
