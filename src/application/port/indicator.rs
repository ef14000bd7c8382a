// SPDX-License-Identifier: MPL-2.0
//! Status indicator ports.
//!
//! Indicators are window-scoped and shared by every open preview. A preview
//! never owns them; it only pushes values and toggles visibility.

use crate::application::protocol::Dimensions;
use crate::domain::zoom::{Scale, ScaleChange};
use crate::lifecycle::{Listener, Subscription};

/// Shows the pixel dimensions of the active image.
pub trait SizeIndicator {
    fn update(&self, size: &Dimensions);
    fn show(&self);
    /// Hides the indicator. Hiding twice is harmless.
    fn hide(&self);
}

/// Shows the zoom level of the active image and lets the user pick a new one.
pub trait ZoomIndicator {
    fn update(&self, scale: Scale);
    fn show(&self);
    /// Hides the indicator. Hiding twice is harmless.
    fn hide(&self);
    /// Change stream fired when the indicator's scale changes.
    fn on_did_change_scale(&self, listener: Listener<ScaleChange>) -> Subscription;
}
