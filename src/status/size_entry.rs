// SPDX-License-Identifier: MPL-2.0
//! Image dimensions indicator.

use crate::application::port::SizeIndicator;
use crate::application::protocol::Dimensions;
use std::cell::{Cell, RefCell};

#[derive(Debug, Default)]
pub struct SizeStatusEntry {
    text: RefCell<Option<String>>,
    visible: Cell<bool>,
}

impl SizeStatusEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pushed dimensions, verbatim.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl SizeIndicator for SizeStatusEntry {
    fn update(&self, size: &Dimensions) {
        *self.text.borrow_mut() = Some(size.to_string());
    }

    fn show(&self) {
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}
