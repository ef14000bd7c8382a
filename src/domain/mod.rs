// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with no knowledge of any host platform.
//!
//! # Modules
//!
//! - [`resource`]: Resource identity ([`ResourceLocator`](resource::ResourceLocator))
//!   and the surface allow-list ([`ResourceRoots`](resource::ResourceRoots))
//! - [`view`]: Preview lifecycle ([`ViewState`](view::ViewState),
//!   [`PreviewPhase`](view::PreviewPhase))
//! - [`zoom`]: Zoom scale ([`Scale`](zoom::Scale), [`ScaleChange`](zoom::ScaleChange))

pub mod resource;
pub mod view;
pub mod zoom;
