//! # Reactive State Primitives
//!
//! Thin wrapper over `futures_signals::signal::Mutable` giving workflows a
//! uniform read/update surface and frontends a `Signal` to subscribe to.
//! Clones share the same underlying cell.

use futures_signals::signal::{Mutable, Signal};

/// A shared reactive cell holding one view-state record.
#[derive(Debug)]
pub struct ReactiveState<T> {
    inner: Mutable<T>,
}

impl<T: Clone> ReactiveState<T> {
    /// Create a cell with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutable::new(value),
        }
    }

    /// Snapshot the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.get_cloned()
    }

    /// Replace the value wholesale.
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }

    /// Mutate the value in place under the cell's lock.
    ///
    /// The closure must not block or re-enter this cell.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut guard = self.inner.lock_mut();
        f(&mut guard);
    }

    /// A signal yielding the current value and every subsequent change.
    pub fn signal(&self) -> impl Signal<Item = T> {
        self.inner.signal_cloned()
    }

    /// Read a projection of the current value without cloning the whole record.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock_ref())
    }
}

impl<T: Clone> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
