// SPDX-License-Identifier: MPL-2.0
//! Change feed driven by the host instead of the operating system.
//!
//! Useful where native notifications are unavailable or unwanted: the host
//! calls [`ManualWatcher::change`] when it knows a file was rewritten.

use crate::application::port::{FileWatch, FileWatcher};
use crate::domain::resource::ResourceLocator;
use crate::error::{Error, Result};
use crate::lifecycle::{Disposable, Emitter, Listener, Subscription};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Default)]
pub struct ManualWatcher {
    changes: Rc<Emitter<ResourceLocator>>,
    watched: RefCell<Vec<PathBuf>>,
    released: Rc<Cell<usize>>,
    refusal: RefCell<Option<String>>,
}

impl ManualWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `locator` as changed to every live watch.
    pub fn change(&self, locator: &ResourceLocator) {
        self.changes.fire(locator.clone());
    }

    /// Makes later [`FileWatcher::watch`] calls fail with `reason`.
    pub fn refuse(&self, reason: impl Into<String>) {
        *self.refusal.borrow_mut() = Some(reason.into());
    }

    /// Paths passed to [`FileWatcher::watch`], in call order.
    #[must_use]
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        self.watched.borrow().clone()
    }

    /// Number of watches disposed so far.
    #[must_use]
    pub fn released_count(&self) -> usize {
        self.released.get()
    }

    /// Number of listeners attached across all live watches.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }
}

impl FileWatcher for ManualWatcher {
    fn watch(&self, path: &Path) -> Result<Box<dyn FileWatch>> {
        if let Some(reason) = self.refusal.borrow().as_ref() {
            return Err(Error::Watch(reason.clone()));
        }
        self.watched.borrow_mut().push(path.to_path_buf());
        Ok(Box::new(ManualWatch {
            changes: Rc::clone(&self.changes),
            released: Rc::clone(&self.released),
            disposed: false,
        }))
    }
}

struct ManualWatch {
    changes: Rc<Emitter<ResourceLocator>>,
    released: Rc<Cell<usize>>,
    disposed: bool,
}

impl FileWatch for ManualWatch {
    fn on_did_change(&mut self, listener: Listener<ResourceLocator>) -> Subscription {
        if self.disposed {
            return Subscription::empty();
        }
        self.changes.subscribe(listener)
    }
}

impl Disposable for ManualWatch {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.released.set(self.released.get() + 1);
    }
}

impl std::fmt::Debug for ManualWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualWatcher")
            .field("watched", &self.watched.borrow())
            .field("released", &self.released.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn change_reaches_subscribed_listener() {
        let watcher = ManualWatcher::new();
        let mut watch = watcher.watch(Path::new("/proj/a.png")).unwrap();
        let (tx, rx) = mpsc::channel();
        let _sub = watch.on_did_change(Box::new(move |locator| tx.send(locator).unwrap()));

        let locator = ResourceLocator::parse("file:///proj/a.png").unwrap();
        watcher.change(&locator);

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![locator]);
        assert_eq!(watcher.watched_paths(), vec![PathBuf::from("/proj/a.png")]);
    }

    #[test]
    fn refusal_surfaces_as_watch_error() {
        let watcher = ManualWatcher::new();
        watcher.refuse("too many watches");
        assert!(matches!(
            watcher.watch(Path::new("/proj/a.png")),
            Err(Error::Watch(reason)) if reason == "too many watches"
        ));
    }

    #[test]
    fn disposal_is_counted_once() {
        let watcher = ManualWatcher::new();
        let mut watch = watcher.watch(Path::new("/proj/a.png")).unwrap();
        watch.dispose();
        watch.dispose();
        assert_eq!(watcher.released_count(), 1);
    }
}
