// SPDX-License-Identifier: MPL-2.0
//! `image_preview` keeps a sandboxed image preview surface and the window's
//! size and zoom indicators in sync.
//!
//! A [`preview::Preview`] coordinates one surface showing one image: it
//! restricts what the surface may load, relays the surface's size and zoom
//! reports, pushes zoom changes back while its view is focused, and re-renders
//! when the image changes on disk. [`session::PreviewSession`] owns the shared
//! indicators and the open previews of a window.

#![doc(html_root_url = "https://docs.rs/image_preview/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod lifecycle;
pub mod preview;
pub mod session;
pub mod status;
