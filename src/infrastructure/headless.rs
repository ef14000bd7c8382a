// SPDX-License-Identifier: MPL-2.0
//! In-process rendering surface.
//!
//! `HeadlessSurface` keeps the installed document and every posted command in
//! memory instead of displaying them. The owning host drives it through
//! [`set_active`](HeadlessSurface::set_active), [`receive`](HeadlessSurface::receive)
//! and [`dispose`](HeadlessSurface::dispose), which fire the same change
//! streams a real surface would.

use crate::application::port::{Surface, SurfaceOptions};
use crate::application::protocol::OutboundCommand;
use crate::domain::resource::ResourceLocator;
use crate::lifecycle::{Emitter, Listener, Subscription};
use std::cell::{Cell, RefCell};

#[derive(Default)]
pub struct HeadlessSurface {
    resource_origin: Option<String>,
    options: RefCell<Option<SurfaceOptions>>,
    contents: RefCell<Vec<String>>,
    posted: RefCell<Vec<OutboundCommand>>,
    active: Cell<bool>,
    disposed: Cell<bool>,
    refuse_posts: Cell<bool>,
    on_did_receive_message: Emitter<serde_json::Value>,
    on_did_change_view_state: Emitter<()>,
    on_did_dispose: Emitter<()>,
}

impl HeadlessSurface {
    /// A surface that addresses resources by their own locators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface serving `file:` resources from `origin`.
    ///
    /// `file:///proj/a.png` becomes `{origin}/proj/a.png`; other locators are
    /// left as they are.
    #[must_use]
    pub fn with_resource_origin(origin: &str) -> Self {
        Self {
            resource_origin: Some(origin.trim_end_matches('/').to_string()),
            ..Self::default()
        }
    }

    /// Changes focus and notifies view-state listeners.
    pub fn set_active(&self, active: bool) {
        if self.disposed.get() {
            return;
        }
        self.active.set(active);
        self.on_did_change_view_state.fire(());
    }

    /// Delivers a message as if the bootstrap script had posted it.
    pub fn receive(&self, message: serde_json::Value) {
        if self.disposed.get() {
            return;
        }
        self.on_did_receive_message.fire(message);
    }

    /// Tears the surface down and notifies dispose listeners once.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.active.set(false);
        self.on_did_dispose.fire(());
    }

    /// Makes every later [`Surface::post_message`] report a dropped post.
    pub fn refuse_posts(&self, refuse: bool) {
        self.refuse_posts.set(refuse);
    }

    #[must_use]
    pub fn options(&self) -> Option<SurfaceOptions> {
        self.options.borrow().clone()
    }

    /// The installed document, if any.
    #[must_use]
    pub fn content(&self) -> Option<String> {
        self.contents.borrow().last().cloned()
    }

    /// How many documents were installed so far.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.contents.borrow().len()
    }

    /// Commands accepted by [`Surface::post_message`], oldest first.
    #[must_use]
    pub fn posted(&self) -> Vec<OutboundCommand> {
        self.posted.borrow().clone()
    }

    /// Total listeners currently registered on this surface.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.on_did_receive_message.listener_count()
            + self.on_did_change_view_state.listener_count()
            + self.on_did_dispose.listener_count()
    }
}

impl Surface for HeadlessSurface {
    fn set_options(&self, options: SurfaceOptions) {
        log::trace!("surface roots: {:?}", options.local_resource_roots);
        *self.options.borrow_mut() = Some(options);
    }

    fn set_content(&self, html: String) {
        if self.disposed.get() {
            return;
        }
        self.contents.borrow_mut().push(html);
    }

    fn post_message(&self, command: &OutboundCommand) -> bool {
        if self.disposed.get() || self.refuse_posts.get() {
            return false;
        }
        self.posted.borrow_mut().push(command.clone());
        true
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn as_addressable_uri(&self, resource: &ResourceLocator) -> ResourceLocator {
        let Some(origin) = &self.resource_origin else {
            return resource.clone();
        };
        if !resource.is_file() {
            return resource.clone();
        }
        ResourceLocator::parse(&format!("{origin}{}", resource.path()))
            .unwrap_or_else(|_| resource.clone())
    }

    fn on_did_receive_message(&self, listener: Listener<serde_json::Value>) -> Subscription {
        self.on_did_receive_message.subscribe(listener)
    }

    fn on_did_change_view_state(&self, listener: Listener<()>) -> Subscription {
        self.on_did_change_view_state.subscribe(listener)
    }

    fn on_did_dispose(&self, listener: Listener<()>) -> Subscription {
        self.on_did_dispose.subscribe(listener)
    }
}

impl std::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("resource_origin", &self.resource_origin)
            .field("active", &self.active.get())
            .field("disposed", &self.disposed.get())
            .field("contents", &self.contents.borrow().len())
            .finish_non_exhaustive()
    }
}
