//! Token-guarded async resource.
//!
//! A [`Resource`] tracks the latest *applied* result of a repeatable async
//! load. Every load takes a [`RequestToken`] when it starts; a result is
//! applied only if its token is newer than the last applied one, so a slow
//! request that resolves after a newer one is silently discarded.

use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Error type for resource loading failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResourceError {
    /// Error message
    pub message: String,
}

impl ResourceError {
    /// Create a new resource error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ResourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ResourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The state of the most recent applied load.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A request is in flight and nothing newer has been applied
    Loading,
    /// The latest applied request succeeded
    Ready(T),
    /// The latest applied request failed
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    /// Check if resource is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if resource errored
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get reference to ready value
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present
    pub fn as_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Sequence number handed out when a load starts.
///
/// Tokens are strictly increasing per resource; a higher token always
/// belongs to a later request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct ResourceInner<T> {
    state: ResourceState<T>,
    /// Value of the last successful applied load. Survives later failures
    /// and reloads.
    last_value: Option<T>,
    issued: u64,
    applied: u64,
    in_flight: usize,
}

impl<T> Default for ResourceInner<T> {
    fn default() -> Self {
        Self {
            state: ResourceState::Idle,
            last_value: None,
            issued: 0,
            applied: 0,
            in_flight: 0,
        }
    }
}

/// Async-loadable resource with last-applied-wins semantics.
///
/// Cheap to clone; clones share the same state.
///
/// # Example
///
/// ```
/// use docview_lib::resource::Resource;
///
/// let list: Resource<Vec<u32>> = Resource::new();
///
/// let first = list.begin();
/// let second = list.begin();
///
/// // The newer request resolves first and wins.
/// assert!(list.resolve(second, vec![2]));
/// assert!(!list.resolve(first, vec![1]));
/// assert_eq!(list.last_value(), Some(vec![2]));
/// ```
#[derive(Debug)]
pub struct Resource<T> {
    inner: Arc<RwLock<ResourceInner<T>>>,
}

impl<T> Resource<T> {
    /// Create a new resource in idle state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceInner::default())),
        }
    }

    /// Start a request and return its token.
    ///
    /// The state moves to `Loading`; the last value stays available.
    pub fn begin(&self) -> RequestToken {
        let Ok(mut guard) = self.inner.write() else {
            return RequestToken(0);
        };
        guard.issued += 1;
        guard.in_flight += 1;
        guard.state = ResourceState::Loading;
        RequestToken(guard.issued)
    }

    /// Complete a request successfully.
    ///
    /// Returns `true` if the value was applied, `false` if a newer request
    /// has already been applied and this result is stale.
    pub fn resolve(&self, token: RequestToken, value: T) -> bool
    where
        T: Clone,
    {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        guard.in_flight = guard.in_flight.saturating_sub(1);
        if token.0 <= guard.applied {
            return false;
        }
        guard.applied = token.0;
        guard.last_value = Some(value.clone());
        guard.state = ResourceState::Ready(value);
        true
    }

    /// Complete a request with an error.
    ///
    /// Same staleness rule as [`resolve`](Self::resolve). The last good value
    /// is kept.
    pub fn fail(&self, token: RequestToken, err: impl Into<ResourceError>) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        guard.in_flight = guard.in_flight.saturating_sub(1);
        if token.0 <= guard.applied {
            return false;
        }
        guard.applied = token.0;
        guard.state = ResourceState::Error(err.into());
        true
    }

    /// Get a clone of the current state
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.state.clone())
            .unwrap_or(ResourceState::Idle)
    }

    /// Value of the last successfully applied request
    pub fn last_value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.last_value.clone())
    }

    /// Whether any started request has not completed yet
    pub fn is_pending(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.in_flight > 0)
            .unwrap_or(false)
    }

    /// Token of the last applied request, if any
    pub fn applied_token(&self) -> Option<RequestToken> {
        self.inner
            .read()
            .ok()
            .filter(|guard| guard.applied > 0)
            .map(|guard| RequestToken(guard.applied))
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
