// SPDX-License-Identifier: MPL-2.0
//! Opaque locator for a previewed resource.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Scheme of filesystem-backed locators.
pub const FILE_SCHEME: &str = "file";

/// Scheme of inline, data-encoded locators.
pub const DATA_SCHEME: &str = "data";

/// Scheme + path identity of a resource.
///
/// Equality is string identity of the canonical serialized form, which is
/// also how file-change notifications are matched against the previewed
/// resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLocator(Url);

impl ResourceLocator {
    /// Parses an absolute locator such as `file:///img/a.png` or `data:image/png;base64,...`.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self(Url::parse(input)?))
    }

    /// Builds a `file:` locator from an absolute filesystem path.
    pub fn from_file_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Url::from_file_path(path)
            .map(Self)
            .map_err(|()| Error::Locator(format!("not an absolute path: {}", path.display())))
    }

    /// Builds a `file:` locator for a directory; the result ends with `/`.
    pub fn from_directory_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Url::from_directory_path(path)
            .map(Self)
            .map_err(|()| Error::Locator(format!("not an absolute path: {}", path.display())))
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.0.path()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns `true` for locators a filesystem watcher can observe.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.scheme() == FILE_SCHEME
    }

    /// Returns `true` for inline locators that never change after creation.
    #[must_use]
    pub fn is_data(&self) -> bool {
        self.scheme() == DATA_SCHEME
    }

    /// Returns `true` if the locator has a path other locators can sit below.
    ///
    /// `data:` and other opaque locators are not hierarchical.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        !self.0.cannot_be_a_base()
    }

    /// Filesystem path of a `file:` locator.
    #[must_use]
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_file() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    /// The directory containing this resource, with a trailing `/`.
    ///
    /// Query and fragment are dropped. A non-hierarchical locator has no
    /// containing directory and is returned unchanged.
    #[must_use]
    pub fn parent(&self) -> Self {
        if !self.is_hierarchical() {
            return self.clone();
        }
        let mut url = self.0.clone();
        let path = self.0.path();
        let cut = path.rfind('/').map_or(0, |idx| idx + 1);
        let parent = if cut == 0 { "/" } else { &path[..cut] };
        url.set_path(parent);
        url.set_query(None);
        url.set_fragment(None);
        Self(url)
    }

    /// Locator of a bundled asset below this root, e.g. `/media/main.css`.
    #[must_use]
    pub fn join_asset(&self, asset: &str) -> Self {
        let mut url = self.0.clone();
        let path = format!(
            "{}/{}",
            self.0.path().trim_end_matches('/'),
            asset.trim_start_matches('/')
        );
        url.set_path(&path);
        Self(url)
    }

    /// Copy of this locator with `name=value` appended to its query.
    #[must_use]
    pub fn with_query_param(&self, name: &str, value: &str) -> Self {
        let mut url = self.0.clone();
        url.query_pairs_mut().append_pair(name, value);
        Self(url)
    }

    /// Returns `true` if `other` lies at or below this locator.
    #[must_use]
    pub fn contains(&self, other: &ResourceLocator) -> bool {
        if self.scheme() != other.scheme() {
            return false;
        }
        let root = self.as_str();
        let candidate = other.as_str();
        if root.ends_with('/') {
            candidate.starts_with(root)
        } else {
            candidate == root
                || candidate
                    .strip_prefix(root)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
    }
}

impl From<Url> for ResourceLocator {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
