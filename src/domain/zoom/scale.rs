// SPDX-License-Identifier: MPL-2.0
//! Zoom scale value object.

use serde::{Deserialize, Serialize};

// =============================================================================
// Zoom Levels
// =============================================================================

/// Numeric levels offered by the zoom indicator's picker, smallest first.
pub const ZOOM_LEVELS: [f64; 18] = [
    0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.5, 2.0, 3.0, 5.0, 7.0, 10.0, 15.0, 20.0,
];

// =============================================================================
// ScaleMode
// =============================================================================

/// Named scale modes that are not a fixed factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Scale the image so it fits entirely inside the surface.
    Fit,
}

// =============================================================================
// Scale
// =============================================================================

/// Zoom scale as spoken on the wire: either a mode (`"fit"`) or a factor
/// where `1.0` is the image's natural size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Mode(ScaleMode),
    Factor(f64),
}

impl Scale {
    #[must_use]
    pub fn fit() -> Self {
        Scale::Mode(ScaleMode::Fit)
    }

    #[must_use]
    pub fn factor(value: f64) -> Self {
        Scale::Factor(value)
    }

    #[must_use]
    pub fn is_fit(self) -> bool {
        matches!(self, Scale::Mode(ScaleMode::Fit))
    }

    #[must_use]
    pub fn as_factor(self) -> Option<f64> {
        match self {
            Scale::Factor(value) => Some(value),
            Scale::Mode(_) => None,
        }
    }

    /// Factor as a rounded percentage (`1.5` → `150`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(self) -> Option<i64> {
        self.as_factor().map(|value| (value * 100.0).round() as i64)
    }

    /// Every scale the zoom picker offers: numeric levels, then `fit`.
    #[must_use]
    pub fn ladder() -> Vec<Scale> {
        ZOOM_LEVELS
            .iter()
            .copied()
            .map(Scale::Factor)
            .chain(std::iter::once(Scale::fit()))
            .collect()
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::fit()
    }
}

/// Payload of the zoom indicator's change stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleChange {
    pub scale: Scale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Scale::fit()).unwrap(), "\"fit\"");
    }

    #[test]
    fn factor_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Scale::factor(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn deserializes_mode_or_number() {
        assert_eq!(
            serde_json::from_str::<Scale>("\"fit\"").unwrap(),
            Scale::fit()
        );
        assert_eq!(
            serde_json::from_str::<Scale>("2").unwrap(),
            Scale::factor(2.0)
        );
        assert!(serde_json::from_str::<Scale>("\"stretch\"").is_err());
    }

    #[test]
    fn percent_rounds_factor() {
        assert_eq!(Scale::factor(1.5).percent(), Some(150));
        assert_eq!(Scale::factor(0.333).percent(), Some(33));
        assert_eq!(Scale::fit().percent(), None);
    }

    #[test]
    fn ladder_ends_with_fit() {
        let ladder = Scale::ladder();
        assert_eq!(ladder.len(), ZOOM_LEVELS.len() + 1);
        assert_eq!(ladder.first(), Some(&Scale::factor(0.1)));
        assert_eq!(ladder.last(), Some(&Scale::fit()));
    }
}
