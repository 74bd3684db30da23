//! View configuration

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::query::DEFAULT_INCLUDE;

/// Translation keys for the notifications the view emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageKeys {
    /// Shown after a successful upload, with the file count.
    pub upload_success: String,
    /// Shown after a failed upload, with the attempted file count.
    pub upload_failed: String,
    /// Shown when a list refresh fails, with count 0.
    pub fetch_failed: String,
}

impl Default for MessageKeys {
    fn default() -> Self {
        Self {
            upload_success: "alexandria.success.upload-document".to_string(),
            upload_failed: "alexandria.errors.upload-document".to_string(),
            fetch_failed: "alexandria.errors.fetch-documents".to_string(),
        }
    }
}

/// Configuration for a [`DocumentView`](crate::DocumentView).
///
/// Every field has a default, so a partial JSON file is enough.
///
/// # Example
///
/// ```
/// use docview_lib::ViewConfig;
///
/// let config = ViewConfig::default()
///     .with_include(["category", "files"])
///     .with_list_view(false);
///
/// assert_eq!(config.include, vec!["category", "files"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Relations to include with every document query.
    ///
    /// Default: `category`, `files`, `tags`
    pub include: Vec<String>,

    /// Notification translation keys.
    pub messages: MessageKeys,

    /// Start in list presentation rather than grid.
    ///
    /// Default: `true`
    pub list_view: bool,

    /// Events buffered per subscriber before slow subscribers lag.
    ///
    /// Default: 64
    pub event_capacity: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.iter().map(|r| r.to_string()).collect(),
            messages: MessageKeys::default(),
            list_view: true,
            event_capacity: 64,
        }
    }
}

impl ViewConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a JSON file and validates it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parses a config from JSON text and validates it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.include.iter().any(|r| r.is_empty() || r.contains(',')) {
            return Err(ConfigError::Invalid {
                field: "include",
                message: "relation names must be non-empty and must not contain ','".to_string(),
            });
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "event_capacity",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Sets the included relations.
    pub fn with_include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = include.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the notification keys.
    pub fn with_messages(mut self, messages: MessageKeys) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the initial presentation.
    pub fn with_list_view(mut self, list_view: bool) -> Self {
        self.list_view = list_view;
        self
    }

    /// Sets the event buffer size.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}
