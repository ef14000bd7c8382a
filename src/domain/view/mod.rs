// SPDX-License-Identifier: MPL-2.0
//! View lifecycle types.

mod state;

pub use state::{PreviewPhase, ViewState};
