//! Identifier and reference types
//!
//! Documents point at categories and tags by id only. Resolving a reference
//! to a full record is the storage layer's job.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Unique identifier of a document.
///
/// Selection and reconciliation compare documents by this id, never by
/// their other fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Reference to the category a document belongs to.
///
/// A category reference in the active filters is what makes the view a
/// valid drop target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRef(String);

impl CategoryRef {
    /// Creates a category reference.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the referenced category slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryRef {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

/// Reference to a tag attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagRef(String);

impl TagRef {
    /// Creates a tag reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the referenced tag id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
