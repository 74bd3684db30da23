//! Query descriptor sent to the document source.

use serde::Serialize;

use super::FilterSet;
use super::SortState;

/// Relations eagerly included with every document query.
pub const DEFAULT_INCLUDE: &[&str] = &["category", "files", "tags"];

/// Everything a document source needs to run one list query.
///
/// Serializes to the JSON:API-style parameter object
/// `{"include": "...", "filter": {...}, "sort": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    /// Comma-separated relations to expand.
    pub include: String,
    /// Filter criteria; an empty object when the host supplied none.
    pub filter: FilterSet,
    /// Encoded sort token; empty for storage default order.
    pub sort: String,
}

impl QueryDescriptor {
    /// Builds a descriptor from its parts.
    pub fn build<S: AsRef<str>>(include: &[S], filters: Option<&FilterSet>, sort: &SortState) -> Self {
        Self {
            include: include
                .iter()
                .map(|relation| relation.as_ref())
                .collect::<Vec<_>>()
                .join(","),
            filter: filters.cloned().unwrap_or_default(),
            sort: sort.token(),
        }
    }

    /// Relations to expand, split back into names.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.include.split(',').filter(|r| !r.is_empty())
    }

    /// Decodes the sort token.
    pub fn sort_state(&self) -> SortState {
        SortState::from_token(&self.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_filters_or_sort() {
        let query = QueryDescriptor::build(DEFAULT_INCLUDE, None, &SortState::default());

        assert_eq!(query.include, "category,files,tags");
        assert!(query.filter.is_empty());
        assert_eq!(query.sort, "");
    }

    #[test]
    fn test_build_with_descending_sort() {
        let filters = FilterSet::new().with("category", "reports");
        let query = QueryDescriptor::build(DEFAULT_INCLUDE, Some(&filters), &SortState::desc("date"));

        assert_eq!(query.filter, filters);
        assert_eq!(query.sort, "-date");
        assert_eq!(query.sort_state(), SortState::desc("date"));
    }

    #[test]
    fn test_serialized_shape() {
        let query = QueryDescriptor::build(&["files"], None, &SortState::asc("title"));
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"include": "files", "filter": {}, "sort": "title"})
        );
        assert_eq!(query.relations().collect::<Vec<_>>(), vec!["files"]);
    }
}
