// SPDX-License-Identifier: MPL-2.0
//! Zoom domain types.

pub mod scale;

pub use scale::{Scale, ScaleChange, ScaleMode, ZOOM_LEVELS};
