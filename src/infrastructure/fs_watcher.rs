// SPDX-License-Identifier: MPL-2.0
//! Filesystem watcher backed by `notify`.
//!
//! Events arrive on `notify`'s own thread. Listeners receive the locator of
//! every created or modified path; for previews that only enqueues an event,
//! so delivery from a foreign thread is safe.
//!
//! The watch is placed on the file's directory, not the file. Editors that
//! save by renaming a temporary file over the target replace the file's
//! inode, and a watch on the old inode would go silent after the first save.
//! Sibling changes are reported too; previews drop them by locator.

use crate::application::port::{FileWatch, FileWatcher};
use crate::domain::resource::ResourceLocator;
use crate::error::Result;
use crate::lifecycle::{Disposable, Listener, Subscription};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::{Arc, Mutex};

type Listeners = Arc<Mutex<Vec<(u64, Listener<ResourceLocator>)>>>;

/// Creates one native watch per previewed file.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyWatcher;

impl NotifyWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Starts a native, non-recursive watch on the directory holding `path`.
    ///
    /// A path without a parent is watched directly.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Watch`] if the directory cannot be watched.
    pub fn start(&self, path: &Path) -> Result<NotifyWatch> {
        let listeners: Listeners = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&listeners);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) if event.kind.is_create() || event.kind.is_modify() => {
                    dispatch(&sink, &event);
                }
                Ok(_) => {}
                Err(err) => log::warn!("file watch error: {err}"),
            }
        })?;

        let target = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => path,
        };
        watcher.watch(target, RecursiveMode::NonRecursive)?;
        log::debug!("watching {} via {}", path.display(), target.display());

        Ok(NotifyWatch {
            watcher: Some(watcher),
            listeners,
            next_id: 0,
        })
    }
}

impl FileWatcher for NotifyWatcher {
    fn watch(&self, path: &Path) -> Result<Box<dyn FileWatch>> {
        Ok(Box::new(self.start(path)?))
    }
}

fn dispatch(listeners: &Listeners, event: &Event) {
    let Ok(listeners) = listeners.lock() else {
        return;
    };
    for path in &event.paths {
        let Ok(locator) = ResourceLocator::from_file_path(path) else {
            continue;
        };
        for (_, listener) in listeners.iter() {
            listener(locator.clone());
        }
    }
}

/// A live `notify` watch. Dropping or disposing it stops the watch.
pub struct NotifyWatch {
    watcher: Option<RecommendedWatcher>,
    listeners: Listeners,
    next_id: u64,
}

impl NotifyWatch {
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}

impl FileWatch for NotifyWatch {
    fn on_did_change(&mut self, listener: Listener<ResourceLocator>) -> Subscription {
        self.next_id += 1;
        let id = self.next_id;
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, listener));
        }
        let registry = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                if let Ok(mut listeners) = registry.lock() {
                    listeners.retain(|(entry, _)| *entry != id);
                }
            }
        })
    }
}

impl Disposable for NotifyWatch {
    fn dispose(&mut self) {
        if self.watcher.take().is_some() {
            if let Ok(mut listeners) = self.listeners.lock() {
                listeners.clear();
            }
        }
    }
}

impl Drop for NotifyWatch {
    fn drop(&mut self) {
        self.dispose();
    }
}
