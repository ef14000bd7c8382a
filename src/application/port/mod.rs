// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the preview's external collaborators.
//!
//! The host platform implements these traits; the coordinator depends only
//! on them.
//!
//! # Available Ports
//!
//! - [`surface`]: The sandboxed rendering surface
//! - [`watcher`]: Filesystem change notifications
//! - [`indicator`]: Window-scoped size and zoom indicators
//!
//! # Design Notes
//!
//! - Methods take `&self`; handles are shared and use interior mutability
//! - Listener registration returns a [`Subscription`](crate::lifecycle::Subscription)
//!   that unregisters on dispose
//! - Listeners must not re-enter the coordinator; they only enqueue events

pub mod indicator;
pub mod surface;
pub mod watcher;

pub use indicator::{SizeIndicator, ZoomIndicator};
pub use surface::{Surface, SurfaceOptions};
pub use watcher::{FileWatch, FileWatcher};
