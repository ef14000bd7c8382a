// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`fs_watcher`]: Filesystem watching via `notify` (implements [`FileWatcher`])
//! - [`manual_watcher`]: Host-driven change feed (implements [`FileWatcher`])
//! - [`headless`]: In-process rendering surface (implements [`Surface`])
//!
//! [`FileWatcher`]: crate::application::port::FileWatcher
//! [`Surface`]: crate::application::port::Surface

pub mod fs_watcher;
pub mod headless;
pub mod manual_watcher;

pub use fs_watcher::{NotifyWatch, NotifyWatcher};
pub use headless::HeadlessSurface;
pub use manual_watcher::ManualWatcher;
