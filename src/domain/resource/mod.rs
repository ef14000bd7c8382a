// SPDX-License-Identifier: MPL-2.0
//! Resource identity and the surface's loadable-content allow-list.

mod locator;
mod roots;

pub use locator::{ResourceLocator, DATA_SCHEME, FILE_SCHEME};
pub use roots::ResourceRoots;
