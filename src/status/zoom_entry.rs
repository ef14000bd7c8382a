// SPDX-License-Identifier: MPL-2.0
//! Zoom level indicator with a level picker.

use crate::application::port::ZoomIndicator;
use crate::domain::zoom::{Scale, ScaleChange};
use crate::i18n::I18n;
use crate::lifecycle::{Emitter, Listener, Subscription};
use fluent_bundle::FluentArgs;
use std::cell::Cell;
use std::rc::Rc;

/// One entry of the zoom picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomMenuItem {
    pub scale: Scale,
    pub label: String,
}

pub struct ZoomStatusEntry {
    scale: Cell<Option<Scale>>,
    visible: Cell<bool>,
    on_did_change_scale: Emitter<ScaleChange>,
    i18n: Rc<I18n>,
}

impl ZoomStatusEntry {
    #[must_use]
    pub fn new(i18n: Rc<I18n>) -> Self {
        Self {
            scale: Cell::new(None),
            visible: Cell::new(false),
            on_did_change_scale: Emitter::new(),
            i18n,
        }
    }

    #[must_use]
    pub fn scale(&self) -> Option<Scale> {
        self.scale.get()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Text shown in the indicator, e.g. `150%` or `Whole Image`.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.scale.get().map(|scale| self.label_for(scale))
    }

    #[must_use]
    pub fn tooltip(&self) -> String {
        self.i18n.tr("zoom-status-tooltip")
    }

    /// Picker entries, smallest level first and `fit` last.
    #[must_use]
    pub fn menu(&self) -> Vec<ZoomMenuItem> {
        Scale::ladder()
            .into_iter()
            .map(|scale| ZoomMenuItem {
                scale,
                label: self.label_for(scale),
            })
            .collect()
    }

    /// The user picked `scale` from the menu. Always notifies listeners.
    pub fn select(&self, scale: Scale) {
        self.scale.set(Some(scale));
        self.on_did_change_scale.fire(ScaleChange { scale });
    }

    fn label_for(&self, scale: Scale) -> String {
        match scale.percent() {
            Some(percent) => {
                let mut args = FluentArgs::new();
                args.set("percent", percent);
                self.i18n.tr_with_args("zoom-status-percent", &args)
            }
            None => self.i18n.tr("zoom-status-whole-image"),
        }
    }
}

impl ZoomIndicator for ZoomStatusEntry {
    /// Records `scale` reported by a surface.
    ///
    /// Unlike [`ZoomStatusEntry::select`], listeners are notified only when
    /// `scale` differs from the previous value. Forwarding every report would
    /// fire the change stream unconditionally, but then a surface that echoes
    /// the `setScale` it was sent would post to itself forever. A repeated
    /// report is therefore recorded silently.
    fn update(&self, scale: Scale) {
        if self.scale.get() == Some(scale) {
            return;
        }
        self.scale.set(Some(scale));
        self.on_did_change_scale.fire(ScaleChange { scale });
    }

    fn show(&self) {
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
    }

    fn on_did_change_scale(&self, listener: Listener<ScaleChange>) -> Subscription {
        self.on_did_change_scale.subscribe(listener)
    }
}

impl std::fmt::Debug for ZoomStatusEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomStatusEntry")
            .field("scale", &self.scale.get())
            .field("visible", &self.visible.get())
            .field("listeners", &self.on_did_change_scale.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::mpsc;

    fn entry() -> ZoomStatusEntry {
        ZoomStatusEntry::new(Rc::new(I18n::new(Some("en-US".into()), &Config::default())))
    }

    #[test]
    fn labels_factor_and_fit() {
        let entry = entry();
        assert!(entry.label().is_none());
        entry.update(Scale::factor(1.5));
        assert_eq!(entry.label().as_deref(), Some("150%"));
        entry.update(Scale::fit());
        assert_eq!(entry.label().as_deref(), Some("Whole Image"));
    }

    #[test]
    fn update_fires_only_on_change() {
        let entry = entry();
        let (tx, rx) = mpsc::channel();
        let _sub = entry.on_did_change_scale(Box::new(move |change| tx.send(change).unwrap()));

        entry.update(Scale::factor(2.0));
        entry.update(Scale::factor(2.0));
        entry.update(Scale::fit());

        let changes: Vec<_> = rx.try_iter().map(|change| change.scale).collect();
        assert_eq!(changes, vec![Scale::factor(2.0), Scale::fit()]);
    }

    #[test]
    fn select_always_fires() {
        let entry = entry();
        let (tx, rx) = mpsc::channel();
        let _sub = entry.on_did_change_scale(Box::new(move |change| tx.send(change).unwrap()));

        entry.select(Scale::factor(3.0));
        entry.select(Scale::factor(3.0));

        assert_eq!(rx.try_iter().count(), 2);
        assert_eq!(entry.scale(), Some(Scale::factor(3.0)));
    }

    #[test]
    fn menu_lists_ladder_with_labels() {
        let menu = entry().menu();
        assert_eq!(menu.len(), Scale::ladder().len());
        assert_eq!(menu[0].label, "10%");
        assert_eq!(menu.last().map(|item| item.label.as_str()), Some("Whole Image"));
    }

    #[test]
    fn visibility_toggles_idempotently() {
        let entry = entry();
        entry.show();
        assert!(entry.is_visible());
        entry.hide();
        entry.hide();
        assert!(!entry.is_visible());
    }
}
