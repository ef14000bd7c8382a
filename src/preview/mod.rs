// SPDX-License-Identifier: MPL-2.0
//! View-lifecycle coordinator for one previewed image.
//!
//! A [`Preview`] owns one rendering surface handle, one resource and the
//! subscriptions tying them to the window's shared indicators. It:
//!
//! - sandboxes the surface to the resource's directory and the extension root
//! - forwards `size`/`zoom` reports from the surface to the indicators
//! - posts `setScale` back to the surface when the zoom indicator changes
//!   while this view is active
//! - re-renders with a fresh version token when the file changes on disk
//! - shows the indicators while active, hides them otherwise, and always
//!   hides them when the surface goes away
//!
//! # Event delivery
//!
//! Listeners registered with collaborators never call into the preview.
//! They enqueue a [`PreviewEvent`] on the preview's own queue, which the host
//! drains with [`Preview::pump`] or by awaiting [`Preview::run`]. Handlers
//! therefore never overlap, and a handler that pushes to a shared indicator
//! cannot re-enter the preview through the indicator's change stream.

pub mod content;
mod event;
pub mod version;


pub use content::{BootstrapDocument, DocumentAssets, PreviewSettings};
pub use event::{Effect, PreviewEvent};
pub use version::{ContentVersion, VersionClock};

use crate::application::port::{
    FileWatcher, SizeIndicator, Surface, SurfaceOptions, ZoomIndicator,
};
use crate::application::protocol::{InboundMessage, OutboundCommand};
use crate::config::defaults::DEFAULT_LOCALE;
use crate::config::Config;
use crate::domain::resource::{ResourceLocator, ResourceRoots};
use crate::domain::view::{PreviewPhase, ViewState};
use crate::domain::zoom::Scale;
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::lifecycle::{Disposable, DisposableStore, Listener};
use std::rc::Rc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Identifier under which hosts register the preview editor.
pub const VIEW_TYPE: &str = "imagePreview.previewEditor";

// =============================================================================
// Options
// =============================================================================

/// Presentation settings shared by every preview of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    pub assets: DocumentAssets,
    /// Localized document title.
    pub title: String,
    /// Document language tag.
    pub lang: String,
    /// Tells the bootstrap script which modifier keys to expect.
    pub is_mac: bool,
}

impl PreviewOptions {
    #[must_use]
    pub fn new(config: &Config, i18n: &I18n) -> Self {
        Self {
            assets: DocumentAssets::from_config(config),
            title: i18n.tr("preview-document-title"),
            lang: i18n.current_locale().to_string(),
            is_mac: cfg!(target_os = "macos"),
        }
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            assets: DocumentAssets::default(),
            title: "Image Preview".to_string(),
            lang: DEFAULT_LOCALE.to_string(),
            is_mac: cfg!(target_os = "macos"),
        }
    }
}

/// The window's shared indicators, as seen by one preview.
#[derive(Clone)]
pub struct Indicators {
    pub size: Rc<dyn SizeIndicator>,
    pub zoom: Rc<dyn ZoomIndicator>,
}

impl Indicators {
    fn show(&self) {
        self.size.show();
        self.zoom.show();
    }

    fn hide(&self) {
        self.size.hide();
        self.zoom.hide();
    }
}

// =============================================================================
// Preview
// =============================================================================

pub struct Preview {
    resource: ResourceLocator,
    roots: ResourceRoots,
    surface: Rc<dyn Surface>,
    indicators: Indicators,
    options: PreviewOptions,
    view: ViewState,
    versions: VersionClock,
    content_version: Option<ContentVersion>,
    subscriptions: DisposableStore,
    events: UnboundedReceiver<PreviewEvent>,
}

impl Preview {
    /// Attaches a preview of `resource` to a live surface.
    ///
    /// Configures the sandbox, subscribes to the surface, the zoom indicator
    /// and (for `file:` resources) a watch on the resource, installs the
    /// first document and applies the surface's current focus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SurfaceDisposed`] if the host already disposed `surface`.
    pub fn new(
        extension_root: ResourceLocator,
        resource: ResourceLocator,
        surface: Rc<dyn Surface>,
        indicators: Indicators,
        watcher: &dyn FileWatcher,
        options: PreviewOptions,
    ) -> Result<Self> {
        if surface.is_disposed() {
            return Err(Error::SurfaceDisposed);
        }

        let roots = ResourceRoots::new(&resource, &extension_root);
        surface.set_options(SurfaceOptions {
            enable_scripts: true,
            local_resource_roots: roots.to_vec(),
        });

        let (sender, events) = mpsc::unbounded_channel();
        let mut subscriptions = DisposableStore::new();
        subscriptions.add(
            surface.on_did_dispose(forward(&sender, |()| PreviewEvent::SurfaceDisposed)),
        );
        subscriptions.add(surface.on_did_receive_message(forward(&sender, |raw| {
            PreviewEvent::Message(InboundMessage::decode(raw))
        })));
        subscriptions.add(
            indicators
                .zoom
                .on_did_change_scale(forward(&sender, PreviewEvent::ScaleChanged)),
        );
        subscriptions.add(
            surface.on_did_change_view_state(forward(&sender, |()| PreviewEvent::ViewStateChanged)),
        );

        if let Some(path) = resource.to_file_path() {
            match watcher.watch(&path) {
                Ok(mut watch) => {
                    let changes = watch.on_did_change(forward(&sender, PreviewEvent::FileChanged));
                    subscriptions.add(watch);
                    subscriptions.add(changes);
                }
                Err(err) => log::warn!("previewing {resource} without change tracking: {err}"),
            }
        }

        let mut preview = Self {
            resource,
            roots,
            surface,
            indicators,
            options,
            view: ViewState::default(),
            versions: VersionClock::new(),
            content_version: None,
            subscriptions,
            events,
        };
        preview.render();
        preview.reconcile();
        log::debug!("opened preview for {} ({:?})", preview.resource, preview.phase());
        Ok(preview)
    }

    #[must_use]
    pub fn resource(&self) -> &ResourceLocator {
        &self.resource
    }

    #[must_use]
    pub fn roots(&self) -> &ResourceRoots {
        &self.roots
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn phase(&self) -> PreviewPhase {
        self.view.phase()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.view.is_active()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.view.is_surface_disposed()
    }

    /// Version token of the installed document, if one was installed.
    #[must_use]
    pub fn content_version(&self) -> Option<ContentVersion> {
        self.content_version
    }

    /// Number of live subscriptions (zero once disposed).
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Applies one event.
    pub fn update(&mut self, event: PreviewEvent) -> Effect {
        if self.view.is_surface_disposed() {
            log::trace!("{}: ignoring {event:?} after disposal", self.resource);
            return Effect::None;
        }
        match event {
            PreviewEvent::Message(message) => self.handle_message(message),
            PreviewEvent::ScaleChanged(change) => self.push_scale(change.scale),
            PreviewEvent::ViewStateChanged => self.reconcile(),
            PreviewEvent::FileChanged(changed) => {
                if changed == self.resource {
                    self.render()
                } else {
                    log::trace!("{}: ignoring change of {changed}", self.resource);
                    Effect::None
                }
            }
            PreviewEvent::SurfaceDisposed => self.teardown(),
        }
    }

    /// Applies every queued event without waiting.
    pub fn pump(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            effects.push(self.update(event));
        }
        effects
    }

    /// Waits for the next queued event.
    ///
    /// Returns `None` once the preview is disposed or every listener is gone.
    pub async fn next_event(&mut self) -> Option<PreviewEvent> {
        if self.view.is_surface_disposed() {
            return None;
        }
        self.events.recv().await
    }

    /// Applies events as they arrive until the preview is disposed.
    pub async fn run(&mut self) {
        while let Some(event) = self.next_event().await {
            self.update(event);
        }
    }

    /// Re-reads the surface's focus flag and shows or hides the indicators.
    ///
    /// Hosts call this after another preview was disposed so the remaining
    /// active view reclaims the shared indicators.
    pub fn refresh_view_state(&mut self) -> Effect {
        if self.view.is_surface_disposed() {
            return Effect::None;
        }
        self.reconcile()
    }

    fn handle_message(&self, message: InboundMessage) -> Effect {
        match message {
            InboundMessage::Size(size) => {
                self.indicators.size.update(&size);
                Effect::SizeUpdated
            }
            InboundMessage::Zoom(scale) => {
                self.indicators.zoom.update(scale);
                Effect::ZoomUpdated
            }
            InboundMessage::Unrecognized => {
                log::trace!("{}: ignoring unrecognized surface message", self.resource);
                Effect::None
            }
        }
    }

    fn push_scale(&self, scale: Scale) -> Effect {
        if !self.view.is_active() {
            return Effect::None;
        }
        if self.surface.is_disposed() {
            return Effect::ScaleDropped;
        }
        if self.surface.post_message(&OutboundCommand::SetScale { scale }) {
            Effect::ScalePosted(scale)
        } else {
            log::debug!("{}: surface dropped setScale", self.resource);
            Effect::ScaleDropped
        }
    }

    fn render(&mut self) -> Effect {
        if self.view.is_surface_disposed() || self.surface.is_disposed() {
            return Effect::None;
        }
        let version = self.versions.next();
        let html = BootstrapDocument {
            surface: self.surface.as_ref(),
            roots: &self.roots,
            resource: &self.resource,
            assets: &self.options.assets,
            title: &self.options.title,
            lang: &self.options.lang,
            is_mac: self.options.is_mac,
        }
        .render(version);
        self.surface.set_content(html);
        self.content_version = Some(version);
        log::trace!("{}: rendered version {version}", self.resource);
        Effect::Rendered(version)
    }

    fn reconcile(&mut self) -> Effect {
        if self.surface.is_disposed() {
            return self.teardown();
        }
        match self.view.reconcile(self.surface.is_active()) {
            Some(PreviewPhase::Active) => {
                self.indicators.show();
                Effect::Activated
            }
            Some(_) => {
                self.indicators.hide();
                Effect::Deactivated
            }
            None => Effect::None,
        }
    }

    /// Unconditional: indicators are hidden whatever the previous focus was.
    fn teardown(&mut self) -> Effect {
        if !self.view.mark_disposed() {
            return Effect::None;
        }
        self.indicators.hide();
        self.subscriptions.dispose();
        self.events.close();
        log::debug!("disposed preview for {}", self.resource);
        Effect::Disposed
    }
}

impl Disposable for Preview {
    fn dispose(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("resource", &self.resource)
            .field("phase", &self.view.phase())
            .field("content_version", &self.content_version)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

fn forward<T: 'static>(
    sender: &UnboundedSender<PreviewEvent>,
    wrap: impl Fn(T) -> PreviewEvent + Send + 'static,
) -> Listener<T> {
    let sender = sender.clone();
    Box::new(move |value| {
        // The receiver is gone only after the preview was dropped.
        let _ = sender.send(wrap(value));
    })
}
