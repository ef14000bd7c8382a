// SPDX-License-Identifier: MPL-2.0
//! Window-scoped status indicators.
//!
//! One [`SizeStatusEntry`] and one [`ZoomStatusEntry`] exist per window and
//! are shared by every open preview through the indicator ports. Only the
//! state and label text live here; drawing them is the host's job.

mod size_entry;
mod zoom_entry;

pub use size_entry::SizeStatusEntry;
pub use zoom_entry::{ZoomMenuItem, ZoomStatusEntry};
