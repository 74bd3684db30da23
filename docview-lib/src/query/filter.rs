//! Host-supplied filter criteria.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::model::CategoryRef;

/// Key-value filter criteria supplied by the host.
///
/// The core passes these through to the document source untouched. The one
/// key it reads is `category`, which decides whether files may be dropped
/// onto the view.
///
/// # Example
///
/// ```
/// use docview_lib::query::FilterSet;
///
/// let filters = FilterSet::new()
///     .with("category", "invoices")
///     .with("tags", "paid");
///
/// assert_eq!(filters.category().unwrap().as_str(), "invoices");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    entries: BTreeMap<String, Value>,
}

impl FilterSet {
    /// Key holding the category reference.
    pub const CATEGORY: &'static str = "category";

    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion, replacing any previous value for the key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a category criterion.
    pub fn with_category(self, category: &CategoryRef) -> Self {
        self.with(Self::CATEGORY, category.as_str())
    }

    /// Inserts a criterion, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a criterion.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns the value of a criterion.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if there are no criteria.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the criteria in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The category reference, if one is set.
    ///
    /// Null, empty strings and non-scalar values count as "no category".
    /// Numeric ids are accepted and converted to their decimal form.
    pub fn category(&self) -> Option<CategoryRef> {
        match self.entries.get(Self::CATEGORY)? {
            Value::String(s) if !s.is_empty() => Some(CategoryRef::new(s.clone())),
            Value::Number(n) => Some(CategoryRef::new(n.to_string())),
            _ => None,
        }
    }
}
