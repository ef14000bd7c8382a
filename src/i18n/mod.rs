// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Indicator labels and the bootstrap document title are localized with the
//! Fluent localization system.
//!
//! # Features
//!
//! - Locale resolution from an explicit override, the config, or the OS
//! - Embedded `.ftl` translation files
//! - Fallback to `en-US` when a locale or key is missing

pub mod fluent;

pub use fluent::I18n;
