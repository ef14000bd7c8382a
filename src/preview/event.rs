// SPDX-License-Identifier: MPL-2.0
//! Events consumed by a preview and the effects it reports back.

use super::version::ContentVersion;
use crate::application::protocol::InboundMessage;
use crate::domain::resource::ResourceLocator;
use crate::domain::zoom::{Scale, ScaleChange};

/// One unit of work for [`Preview::update`](super::Preview::update).
///
/// Collaborator listeners only enqueue these; the preview applies them one
/// at a time, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEvent {
    /// The surface posted a message.
    Message(InboundMessage),
    /// The surface's focus or visibility changed.
    ViewStateChanged,
    /// The host disposed the surface.
    SurfaceDisposed,
    /// A watched file changed on disk.
    FileChanged(ResourceLocator),
    /// The shared zoom indicator's scale changed.
    ScaleChanged(ScaleChange),
}

/// What applying an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing; the event did not apply to this preview.
    None,
    SizeUpdated,
    ZoomUpdated,
    /// `setScale` was delivered to the surface.
    ScalePosted(Scale),
    /// The surface refused the `setScale` post.
    ScaleDropped,
    /// A new bootstrap document was installed.
    Rendered(ContentVersion),
    Activated,
    Deactivated,
    Disposed,
}
