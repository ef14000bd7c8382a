// SPDX-License-Identifier: MPL-2.0
//! Filesystem watch port.

use crate::domain::resource::ResourceLocator;
use crate::error::Result;
use crate::lifecycle::{Disposable, Listener, Subscription};
use std::path::Path;

/// A live watch on one path. Disposing it stops watching.
pub trait FileWatch: Disposable {
    /// Notifies `listener` with the locator of every changed file.
    fn on_did_change(&mut self, listener: Listener<ResourceLocator>) -> Subscription;
}

/// Creates watches on filesystem paths.
pub trait FileWatcher {
    /// Starts watching `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Watch`](crate::error::Error::Watch) if the platform
    /// watch service refuses the path.
    fn watch(&self, path: &Path) -> Result<Box<dyn FileWatch>>;
}
