// SPDX-License-Identifier: MPL-2.0
//! Rendering surface port.
//!
//! The surface is the sandboxed, host-owned context that displays the
//! bootstrap document and exchanges asynchronous messages with the preview.
//! The preview holds a shared, non-owning handle: the host may dispose the
//! surface at any time.

use crate::application::protocol::OutboundCommand;
use crate::domain::resource::ResourceLocator;
use crate::lifecycle::{Listener, Subscription};

/// Sandbox configuration applied to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Allow the bootstrap script to run.
    pub enable_scripts: bool,
    /// The only locators the surface may load content from.
    pub local_resource_roots: Vec<ResourceLocator>,
}

/// Host-side handle of a rendering surface.
pub trait Surface {
    /// Applies sandbox options.
    fn set_options(&self, options: SurfaceOptions);

    /// Replaces the displayed document.
    fn set_content(&self, html: String);

    /// Posts `command` to the surface.
    ///
    /// Returns `false` when the surface could not accept it (e.g. it was torn
    /// down concurrently). A dropped post is not an error.
    fn post_message(&self, command: &OutboundCommand) -> bool;

    /// Whether this surface is the focused view.
    fn is_active(&self) -> bool;

    /// Whether the host has already disposed this surface.
    fn is_disposed(&self) -> bool;

    /// Rewrites `resource` into a form the surface can load.
    fn as_addressable_uri(&self, resource: &ResourceLocator) -> ResourceLocator;

    /// Raw envelopes posted by the surface.
    fn on_did_receive_message(&self, listener: Listener<serde_json::Value>) -> Subscription;

    /// Focus or visibility changed; read [`Surface::is_active`] for the new state.
    fn on_did_change_view_state(&self, listener: Listener<()>) -> Subscription;

    /// The host disposed the surface.
    fn on_did_dispose(&self, listener: Listener<()>) -> Subscription;
}
