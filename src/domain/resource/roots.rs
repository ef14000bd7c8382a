// SPDX-License-Identifier: MPL-2.0
//! Allow-list of locators a rendering surface may load content from.

use super::ResourceLocator;

/// The two roots a preview surface may read from: the directory holding the
/// previewed resource and the extension's install root.
///
/// The set is computed once and exposes no way to add entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoots {
    roots: [ResourceLocator; 2],
}

impl ResourceRoots {
    #[must_use]
    pub fn new(resource: &ResourceLocator, extension_root: &ResourceLocator) -> Self {
        Self {
            roots: [resource.parent(), extension_root.clone()],
        }
    }

    /// Directory containing the previewed resource.
    #[must_use]
    pub fn resource_dir(&self) -> &ResourceLocator {
        &self.roots[0]
    }

    #[must_use]
    pub fn extension_root(&self) -> &ResourceLocator {
        &self.roots[1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceLocator> {
        self.roots.iter()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<ResourceLocator> {
        self.roots.to_vec()
    }

    /// Returns `true` if `locator` lies below one of the roots.
    #[must_use]
    pub fn permits(&self, locator: &ResourceLocator) -> bool {
        self.roots.iter().any(|root| root.contains(locator))
    }
}
