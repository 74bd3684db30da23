//! In-memory document store
//!
//! Implements both [`DocumentSource`] and [`UploadDelegate`] over a
//! concurrent map. Useful for hosts without a backend and for tests.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::DashSet;
use serde_json::Value;
use uuid::Uuid;

use crate::error::SourceError;
use crate::error::UploadError;
use crate::model::CategoryRef;
use crate::model::Document;
use crate::model::DocumentFile;
use crate::model::DocumentId;
use crate::query::Direction;
use crate::query::QueryDescriptor;
use crate::services::DocumentSource;
use crate::services::UploadDelegate;
use crate::upload::UploadFile;

/// A document store held in memory.
///
/// Supports the `category`, `tags` and `search` filter keys and sorting by
/// `title`, `date`, `created_at` and `modified_at`. Unknown filter keys are
/// ignored; unknown sort fields are an error. Without a sort field documents
/// come back in id order.
///
/// # Example
///
/// ```
/// use docview_lib::memory::MemoryDocumentStore;
/// use docview_lib::model::{CategoryRef, Document};
///
/// let store = MemoryDocumentStore::new();
/// store.insert(Document::new("1").with_category(CategoryRef::new("reports")));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<DocumentId, Document>,
    categories: DashSet<CategoryRef>,
    latency: Option<Duration>,
}

impl MemoryDocumentStore {
    /// Creates an empty store that accepts uploads into any category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with documents.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let store = Self::new();
        for doc in documents {
            store.insert(doc);
        }
        store
    }

    /// Restricts uploads to the given categories.
    pub fn with_categories(self, categories: impl IntoIterator<Item = CategoryRef>) -> Self {
        for category in categories {
            self.categories.insert(category);
        }
        self
    }

    /// Delays every query and upload, to mimic a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Inserts or replaces a document.
    pub fn insert(&self, document: Document) {
        self.documents.insert(document.id.clone(), document);
    }

    /// Removes a document.
    pub fn remove(&self, id: &DocumentId) -> Option<Document> {
        self.documents.remove(id).map(|(_, doc)| doc)
    }

    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentStore {
    async fn query(&self, query: &QueryDescriptor) -> Result<Vec<Document>, SourceError> {
        self.delay().await;

        let mut documents: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| matches_filters(entry.value(), query))
            .map(|entry| entry.value().clone())
            .collect();

        documents.sort_by(|a, b| a.id.cmp(&b.id));

        let sort = query.sort_state();
        if let Some(field) = sort.field() {
            let compare = comparator(field)?;
            documents.sort_by(|a, b| match sort.direction() {
                Some(Direction::Desc) => compare(b, a),
                _ => compare(a, b),
            });
        }

        Ok(documents)
    }
}

#[async_trait]
impl UploadDelegate for MemoryDocumentStore {
    async fn upload(&self, category: &CategoryRef, files: &[UploadFile]) -> Result<(), UploadError> {
        self.delay().await;

        if !self.categories.is_empty() && !self.categories.contains(category) {
            return Err(UploadError::UnknownCategory(category.to_string()));
        }
        if let Some(empty) = files.iter().find(|file| file.name.is_empty()) {
            return Err(UploadError::FileRejected {
                name: empty.name.clone(),
                reason: "file name is empty".to_string(),
            });
        }

        let now = Utc::now();
        for file in files {
            let id = Uuid::new_v4().to_string();
            let doc = Document::new(id.as_str())
                .with_title(file.name.clone())
                .with_category(category.clone())
                .with_created_at(now)
                .with_file(DocumentFile::original(format!("{}-original", id), file.name.clone(), now));
            self.insert(doc);
        }
        Ok(())
    }
}

type Comparator = fn(&Document, &Document) -> Ordering;

fn comparator(field: &str) -> Result<Comparator, SourceError> {
    match field {
        "title" => Ok(by_title),
        "date" => Ok(by_date),
        "created_at" | "createdAt" => Ok(by_created_at),
        "modified_at" | "modifiedAt" => Ok(by_modified_at),
        other => Err(SourceError::rejected_with_status(
            400,
            format!("cannot sort by '{}'", other),
        )),
    }
}

fn by_title(a: &Document, b: &Document) -> Ordering {
    a.title.cmp(&b.title)
}

fn by_date(a: &Document, b: &Document) -> Ordering {
    a.date.cmp(&b.date)
}

fn by_created_at(a: &Document, b: &Document) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

fn by_modified_at(a: &Document, b: &Document) -> Ordering {
    a.modified_at.cmp(&b.modified_at)
}

fn matches_filters(doc: &Document, query: &QueryDescriptor) -> bool {
    query.filter.iter().all(|(key, value)| match key {
        "category" => match value {
            Value::Null => true,
            Value::String(s) => doc.category.as_ref().is_some_and(|c| c.as_str() == s),
            Value::Number(n) => doc
                .category
                .as_ref()
                .is_some_and(|c| c.as_str() == n.to_string()),
            _ => false,
        },
        "tags" => tag_values(value)
            .iter()
            .all(|tag| doc.tags.iter().any(|t| t.as_str() == tag)),
        "search" => match value.as_str() {
            Some(needle) => {
                let needle = needle.to_lowercase();
                doc.title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
            }
            None => true,
        },
        _ => true,
    })
}

/// Tag filters are either a comma-separated string or an array of strings.
fn tag_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagRef;
    use crate::query::{DEFAULT_INCLUDE, FilterSet, SortState};

    fn store() -> MemoryDocumentStore {
        MemoryDocumentStore::with_documents([
            Document::new("1")
                .with_title("Beta")
                .with_category(CategoryRef::new("reports"))
                .with_tag(TagRef::new("paid")),
            Document::new("2")
                .with_title("alpha")
                .with_category(CategoryRef::new("reports")),
            Document::new("3")
                .with_title("Gamma")
                .with_category(CategoryRef::new("invoices"))
                .with_tag(TagRef::new("paid")),
        ])
    }

    fn query(filters: Option<&FilterSet>, sort: SortState) -> QueryDescriptor {
        QueryDescriptor::build(DEFAULT_INCLUDE, filters, &sort)
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_order_is_by_id() {
        let docs = store().query(&query(None, SortState::default())).await.unwrap();
        assert_eq!(ids(&docs), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_filter_by_category_and_tags() {
        let store = store();
        let filters = FilterSet::new().with("category", "reports");
        let docs = store.query(&query(Some(&filters), SortState::default())).await.unwrap();
        assert_eq!(ids(&docs), vec!["1", "2"]);

        let filters = FilterSet::new().with("tags", "paid");
        let docs = store.query(&query(Some(&filters), SortState::default())).await.unwrap();
        assert_eq!(ids(&docs), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_sort_by_title_descending() {
        let docs = store().query(&query(None, SortState::desc("title"))).await.unwrap();
        assert_eq!(ids(&docs), vec!["2", "3", "1"]);
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_rejected() {
        let err = store().query(&query(None, SortState::asc("size"))).await.unwrap_err();
        assert_eq!(err.status_code(), Some(400));
    }

    #[tokio::test]
    async fn test_upload_creates_documents_in_category() {
        let store = store();
        let files = [UploadFile::new("scan.pdf", "x"), UploadFile::new("notes.txt", "y")];
        store.upload(&CategoryRef::new("invoices"), &files).await.unwrap();

        let filters = FilterSet::new().with("category", "invoices");
        let docs = store.query(&query(Some(&filters), SortState::asc("title"))).await.unwrap();
        assert_eq!(docs.len(), 3);
        let titles: Vec<_> = docs.iter().filter_map(|d| d.title.as_deref()).collect();
        assert!(titles.contains(&"scan.pdf"));
        assert!(docs.iter().all(|d| d.category == Some(CategoryRef::new("invoices"))));
    }

    #[tokio::test]
    async fn test_upload_into_unknown_category() {
        let store = store().with_categories([CategoryRef::new("reports")]);
        let err = store
            .upload(&CategoryRef::new("other"), &[UploadFile::new("a", "x")])
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnknownCategory(_)));
        assert_eq!(store.len(), 3);
    }
}
