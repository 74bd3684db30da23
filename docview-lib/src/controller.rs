//! Sort and fetch control for the document list.

use std::sync::Arc;

use crate::error::SourceError;
use crate::model::Document;
use crate::query::FilterSet;
use crate::query::QueryDescriptor;
use crate::query::SortState;
use crate::resource::Resource;
use crate::resource::ResourceState;
use crate::services::DocumentSource;
use crate::state::State;

/// The displayed document list. Replaced wholesale, never mutated.
pub type DocumentList = Arc<[Document]>;

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The result replaced the document list.
    Applied(DocumentList),
    /// A newer fetch had already been applied; the result, or the error,
    /// was discarded.
    Stale,
}

impl FetchOutcome {
    /// The new list, if this fetch was applied.
    pub fn applied(&self) -> Option<&DocumentList> {
        match self {
            Self::Applied(list) => Some(list),
            Self::Stale => None,
        }
    }
}

/// Holds sort and filter state and loads the document list.
///
/// Overlapping fetches are allowed. Each takes a request token; the list is
/// replaced only by a result newer than the last applied one.
pub struct QueryController {
    source: Arc<dyn DocumentSource>,
    include: Vec<String>,
    sort: State<SortState>,
    filters: State<Option<FilterSet>>,
    documents: Resource<DocumentList>,
}

impl QueryController {
    /// Create a controller over a document source.
    pub fn new(source: Arc<dyn DocumentSource>, include: Vec<String>) -> Self {
        Self {
            source,
            include,
            sort: State::default(),
            filters: State::default(),
            documents: Resource::new(),
        }
    }

    /// Current sort state.
    pub fn sort(&self) -> SortState {
        self.sort.get()
    }

    /// Current host filters.
    pub fn filters(&self) -> Option<FilterSet> {
        self.filters.get()
    }

    /// Replace the host filters. Does not fetch.
    pub fn set_filters(&self, filters: Option<FilterSet>) {
        self.filters.set(filters);
    }

    /// Apply a column click to the sort state and refetch.
    ///
    /// Same field flips the direction; another field switches to it
    /// ascending.
    pub async fn set_sort(&self, field: &str) -> Result<FetchOutcome, SourceError> {
        self.toggle_sort(field);
        self.fetch().await
    }

    /// Apply a column click to the sort state without fetching.
    pub fn toggle_sort(&self, field: &str) -> SortState {
        let sort = self.sort.update(|sort| {
            sort.toggle(field);
            sort.clone()
        });
        log::debug!("Sort changed to {:?}", sort.token());
        sort
    }

    /// Build the descriptor for a list query with the current sort.
    pub fn build_query(&self, filters: Option<&FilterSet>) -> QueryDescriptor {
        self.sort
            .with(|sort| QueryDescriptor::build(self.include.as_slice(), filters, sort))
    }

    /// Query the source with the current filters and sort.
    ///
    /// On success the list is replaced unless a newer fetch has already
    /// been applied. Errors follow the same rule: an applied error is
    /// recorded in [`state`](Self::state) and returned, a superseded one is
    /// dropped and reported as [`FetchOutcome::Stale`].
    pub async fn fetch(&self) -> Result<FetchOutcome, SourceError> {
        let query = self.filters.with(|filters| self.build_query(filters.as_ref()));
        let token = self.documents.begin();
        log::debug!("Fetch #{} issued: sort={:?}", token.get(), query.sort);

        match self.source.query(&query).await {
            Ok(documents) => {
                let list: DocumentList = documents.into();
                if self.documents.resolve(token, Arc::clone(&list)) {
                    log::debug!("Fetch #{} applied: {} documents", token.get(), list.len());
                    Ok(FetchOutcome::Applied(list))
                } else {
                    log::debug!("Fetch #{} stale, discarded", token.get());
                    Ok(FetchOutcome::Stale)
                }
            }
            Err(err) => {
                if self.documents.fail(token, err.to_string()) {
                    log::warn!("Fetch #{} failed: {}", token.get(), err);
                    Err(err)
                } else {
                    log::debug!("Fetch #{} failed after being superseded: {}", token.get(), err);
                    Ok(FetchOutcome::Stale)
                }
            }
        }
    }

    /// The latest applied document list. Empty before the first fetch.
    pub fn documents(&self) -> DocumentList {
        self.documents
            .last_value()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// State of the latest applied fetch.
    pub fn state(&self) -> ResourceState<DocumentList> {
        self.documents.get()
    }

    /// Whether any fetch is still in flight.
    pub fn is_pending(&self) -> bool {
        self.documents.is_pending()
    }
}
