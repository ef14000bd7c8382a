// SPDX-License-Identifier: MPL-2.0
//! Release-once handles and the store that owns them.

use std::fmt;

// =============================================================================
// Disposable
// =============================================================================

/// A resource with an explicit, idempotent release step.
pub trait Disposable {
    /// Releases the resource. Calling this more than once has no effect.
    fn dispose(&mut self);
}

impl<D: Disposable + ?Sized> Disposable for Box<D> {
    fn dispose(&mut self) {
        (**self).dispose();
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Handle for a registered listener.
///
/// The release closure runs at most once: on [`Disposable::dispose`] or, if
/// that never happened, when the handle is dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps a release closure.
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    #[must_use]
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Returns `true` once the release closure has run (or there was none).
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl Disposable for Subscription {
    fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("released", &self.is_released())
            .finish()
    }
}

// =============================================================================
// DisposableStore
// =============================================================================

/// Collects handles and releases all of them exactly once.
///
/// Handles added after the store was disposed are released immediately.
#[derive(Default)]
pub struct DisposableStore {
    items: Vec<Box<dyn Disposable>>,
    disposed: bool,
}

impl DisposableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `item` until the store is disposed.
    pub fn add(&mut self, item: impl Disposable + 'static) {
        let mut item: Box<dyn Disposable> = Box::new(item);
        if self.disposed {
            item.dispose();
        } else {
            self.items.push(item);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Disposable for DisposableStore {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DisposableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposableStore")
            .field("items", &self.items.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
