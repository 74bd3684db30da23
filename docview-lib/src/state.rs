//! Shared state cells.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A value behind a lock, read and written through short closures.
///
/// A panic while the lock is held does not poison the cell: the next access
/// sees whatever the panicking writer left behind. Every state change the
/// view makes is announced on the event bus, so there is no change tracking
/// here.
///
/// # Example
///
/// ```
/// use docview_lib::state::State;
///
/// let counter = State::new(0u32);
/// let next = counter.update(|v| {
///     *v += 1;
///     *v
/// });
/// assert_eq!(next, 1);
/// assert_eq!(counter.replace(5), 1);
/// ```
#[derive(Debug, Default)]
pub struct State<T> {
    inner: RwLock<T>,
}

impl<T> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.read())
    }

    pub fn set(&self, value: T) {
        *self.write() = value;
    }

    /// Store `value` and hand back the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.write(), value)
    }

    /// Mutate the value in place and return whatever `f` returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.write())
    }
}
