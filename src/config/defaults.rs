// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.

// ==========================================================================
// Bundled Assets
// ==========================================================================

/// Stylesheet loaded by the bootstrap document, relative to the extension root.
pub const DEFAULT_STYLESHEET: &str = "/media/main.css";

/// Script loaded by the bootstrap document, relative to the extension root.
pub const DEFAULT_SCRIPT: &str = "/media/main.js";

// ==========================================================================
// Document
// ==========================================================================

/// Query parameter carrying the content version token.
pub const VERSION_QUERY_PARAM: &str = "version";

/// `id` of the element holding the serialized settings.
pub const SETTINGS_ELEMENT_ID: &str = "image-preview-settings";

/// Locale used when nothing else resolves.
pub const DEFAULT_LOCALE: &str = "en-US";
