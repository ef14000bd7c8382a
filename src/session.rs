// SPDX-License-Identifier: MPL-2.0
//! Window-level owner of the shared indicators and every open preview.
//!
//! The session creates the size and zoom indicators once and hands the same
//! instances to each [`Preview`] it opens. [`PreviewSession::pump`] drains the
//! previews' event queues until nothing is pending, drops disposed previews
//! and lets the remaining active one reclaim the indicators.

use crate::application::port::{FileWatcher, Surface};
use crate::config::Config;
use crate::domain::resource::ResourceLocator;
use crate::error::Result;
use crate::i18n::I18n;
use crate::preview::{Effect, Indicators, Preview, PreviewOptions};
use crate::status::{SizeStatusEntry, ZoomStatusEntry};
use std::fmt;
use std::rc::Rc;

/// Handle of a preview opened by a [`PreviewSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewId(u64);

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview-{}", self.0)
    }
}

pub struct PreviewSession {
    extension_root: ResourceLocator,
    options: PreviewOptions,
    i18n: Rc<I18n>,
    size_entry: Rc<SizeStatusEntry>,
    zoom_entry: Rc<ZoomStatusEntry>,
    previews: Vec<(PreviewId, Preview)>,
    next_id: u64,
}

impl PreviewSession {
    #[must_use]
    pub fn new(
        extension_root: ResourceLocator,
        config: &Config,
        lang_override: Option<String>,
    ) -> Self {
        let i18n = Rc::new(I18n::new(lang_override, config));
        let options = PreviewOptions::new(config, &i18n);
        Self {
            extension_root,
            options,
            size_entry: Rc::new(SizeStatusEntry::new()),
            zoom_entry: Rc::new(ZoomStatusEntry::new(Rc::clone(&i18n))),
            i18n,
            previews: Vec::new(),
            next_id: 0,
        }
    }

    /// Opens a preview of `resource` on `surface`.
    ///
    /// # Errors
    ///
    /// Fails if `surface` was already disposed.
    pub fn open(
        &mut self,
        resource: ResourceLocator,
        surface: Rc<dyn Surface>,
        watcher: &dyn FileWatcher,
    ) -> Result<PreviewId> {
        let indicators = Indicators {
            size: Rc::clone(&self.size_entry) as _,
            zoom: Rc::clone(&self.zoom_entry) as _,
        };
        let preview = Preview::new(
            self.extension_root.clone(),
            resource,
            surface,
            indicators,
            watcher,
            self.options.clone(),
        )?;
        self.next_id += 1;
        let id = PreviewId(self.next_id);
        log::debug!("{id}: {}", preview.resource());
        let background = !preview.is_active();
        self.previews.push((id, preview));
        if background {
            self.reclaim_indicators();
        }
        Ok(id)
    }

    /// Applies pending events until every queue is empty.
    ///
    /// Returns the effects in the order they happened, tagged with the
    /// preview that produced them.
    pub fn pump(&mut self) -> Vec<(PreviewId, Effect)> {
        let mut effects = Vec::new();
        loop {
            let before = effects.len();
            for (id, preview) in &mut self.previews {
                effects.extend(preview.pump().into_iter().map(|effect| (*id, effect)));
            }
            if effects.len() == before {
                break;
            }
        }

        self.previews.retain(|(_, preview)| !preview.is_disposed());
        let hidden = effects
            .iter()
            .any(|(_, effect)| matches!(effect, Effect::Deactivated | Effect::Disposed));
        if hidden {
            effects.extend(self.reclaim_indicators());
        }
        effects
    }

    /// Re-shows the shared indicators for the focused preview after another
    /// preview hid them.
    fn reclaim_indicators(&mut self) -> Vec<(PreviewId, Effect)> {
        self.previews
            .iter_mut()
            .filter(|(_, preview)| preview.is_active())
            .map(|(id, preview)| (*id, preview.refresh_view_state()))
            .filter(|(_, effect)| *effect != Effect::None)
            .collect()
    }

    #[must_use]
    pub fn preview(&self, id: PreviewId) -> Option<&Preview> {
        self.previews
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, preview)| preview)
    }

    /// The preview whose view is currently focused, if any.
    #[must_use]
    pub fn active_preview(&self) -> Option<PreviewId> {
        self.previews
            .iter()
            .find(|(_, preview)| preview.is_active())
            .map(|(id, _)| *id)
    }

    #[must_use]
    pub fn size_entry(&self) -> &SizeStatusEntry {
        &self.size_entry
    }

    #[must_use]
    pub fn zoom_entry(&self) -> &ZoomStatusEntry {
        &self.zoom_entry
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    #[must_use]
    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.previews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previews.is_empty()
    }
}

impl fmt::Debug for PreviewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewSession")
            .field("extension_root", &self.extension_root)
            .field("previews", &self.previews.len())
            .field("locale", &self.i18n.current_locale())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::protocol::OutboundCommand;
    use crate::domain::zoom::Scale;
    use crate::infrastructure::{HeadlessSurface, ManualWatcher};
    use serde_json::json;

    fn loc(input: &str) -> ResourceLocator {
        ResourceLocator::parse(input).expect("valid locator")
    }

    fn session() -> PreviewSession {
        PreviewSession::new(loc("file:///ext/"), &Config::default(), Some("en-US".into()))
    }

    #[test]
    fn closing_a_background_preview_keeps_indicators_for_the_active_one() {
        let mut session = session();
        let watcher = ManualWatcher::new();
        let front = Rc::new(HeadlessSurface::new());
        let back = Rc::new(HeadlessSurface::new());
        front.set_active(true);

        let front_id = session
            .open(loc("file:///proj/a.png"), front.clone(), &watcher)
            .unwrap();
        let back_id = session
            .open(loc("file:///proj/b.png"), back.clone(), &watcher)
            .unwrap();
        assert_eq!(session.active_preview(), Some(front_id));
        assert!(session.size_entry().is_visible());

        back.dispose();
        let effects = session.pump();

        assert!(effects.contains(&(back_id, Effect::Disposed)));
        assert!(effects.contains(&(front_id, Effect::Activated)));
        assert_eq!(session.len(), 1);
        assert!(session.size_entry().is_visible());
        assert!(session.zoom_entry().is_visible());
    }

    #[test]
    fn focus_moving_between_previews_leaves_indicators_visible() {
        let mut session = session();
        let watcher = ManualWatcher::new();
        let left = Rc::new(HeadlessSurface::new());
        let right = Rc::new(HeadlessSurface::new());
        left.set_active(true);
        session
            .open(loc("file:///proj/a.png"), left.clone(), &watcher)
            .unwrap();
        let right_id = session
            .open(loc("file:///proj/b.png"), right.clone(), &watcher)
            .unwrap();

        right.set_active(true);
        left.set_active(false);
        session.pump();

        assert_eq!(session.active_preview(), Some(right_id));
        assert!(session.size_entry().is_visible());
        assert!(session.zoom_entry().is_visible());
    }

    #[test]
    fn zoom_picked_in_indicator_reaches_only_the_active_surface() {
        let mut session = session();
        let watcher = ManualWatcher::new();
        let front = Rc::new(HeadlessSurface::new());
        let back = Rc::new(HeadlessSurface::new());
        front.set_active(true);
        session
            .open(loc("file:///proj/a.png"), front.clone(), &watcher)
            .unwrap();
        session
            .open(loc("file:///proj/b.png"), back.clone(), &watcher)
            .unwrap();

        session.zoom_entry().select(Scale::factor(2.0));
        session.pump();

        assert_eq!(
            front.posted(),
            vec![OutboundCommand::SetScale {
                scale: Scale::factor(2.0)
            }]
        );
        assert!(back.posted().is_empty());
    }

    #[test]
    fn zoom_report_settles_after_one_echo() {
        let mut session = session();
        let watcher = ManualWatcher::new();
        let surface = Rc::new(HeadlessSurface::new());
        surface.set_active(true);
        session
            .open(loc("file:///proj/a.png"), surface.clone(), &watcher)
            .unwrap();

        surface.receive(json!({ "type": "zoom", "value": 1.5 }));
        session.pump();
        surface.receive(json!({ "type": "zoom", "value": 1.5 }));
        session.pump();

        assert_eq!(surface.posted().len(), 1);
        assert_eq!(session.zoom_entry().label().as_deref(), Some("150%"));
    }

    #[test]
    fn open_on_disposed_surface_fails() {
        let mut session = session();
        let surface = Rc::new(HeadlessSurface::new());
        surface.dispose();
        assert!(session
            .open(loc("file:///proj/a.png"), surface, &ManualWatcher::new())
            .is_err());
        assert!(session.is_empty());
    }
}
