// SPDX-License-Identifier: MPL-2.0
//! Message protocol spoken between a preview and its rendering surface.
//!
//! Inbound envelopes have the shape `{ "type": string, "value": T }` and are
//! decoded once, at the boundary, into [`InboundMessage`]. Anything that does
//! not decode into a known kind becomes [`InboundMessage::Unrecognized`] so
//! newer surface scripts never break an older coordinator.

use crate::domain::zoom::Scale;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Dimensions
// =============================================================================

/// Image dimensions as reported by the surface, forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimensions {
    /// Human-readable form such as `512x512`.
    Text(String),
    Number(f64),
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensions::Text(text) => f.write_str(text),
            Dimensions::Number(value) => write!(f, "{value}"),
        }
    }
}

// =============================================================================
// Inbound
// =============================================================================

#[derive(Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
enum Envelope {
    Size(Dimensions),
    Zoom(Scale),
}

/// A message posted by the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// The loaded image's dimensions.
    Size(Dimensions),
    /// The surface's current zoom scale.
    Zoom(Scale),
    /// Unknown kind or malformed payload.
    Unrecognized,
}

impl InboundMessage {
    /// Decodes a raw envelope.
    #[must_use]
    pub fn decode(raw: serde_json::Value) -> Self {
        match serde_json::from_value::<Envelope>(raw) {
            Ok(Envelope::Size(size)) => InboundMessage::Size(size),
            Ok(Envelope::Zoom(scale)) => InboundMessage::Zoom(scale),
            Err(_) => InboundMessage::Unrecognized,
        }
    }

    /// Decodes an envelope from its JSON text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).map_or(InboundMessage::Unrecognized, Self::decode)
    }
}

impl From<serde_json::Value> for InboundMessage {
    fn from(raw: serde_json::Value) -> Self {
        Self::decode(raw)
    }
}

// =============================================================================
// Outbound
// =============================================================================

/// A command posted to the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundCommand {
    /// Apply `scale` to the displayed image.
    SetScale { scale: Scale },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_size_text() {
        assert_eq!(
            InboundMessage::decode(json!({ "type": "size", "value": "512x512" })),
            InboundMessage::Size(Dimensions::Text("512x512".into()))
        );
    }

    #[test]
    fn decodes_numeric_size() {
        assert_eq!(
            InboundMessage::decode(json!({ "type": "size", "value": 1024 })),
            InboundMessage::Size(Dimensions::Number(1024.0))
        );
    }

    #[test]
    fn decodes_zoom_factor_and_mode() {
        assert_eq!(
            InboundMessage::decode(json!({ "type": "zoom", "value": 2.5 })),
            InboundMessage::Zoom(Scale::factor(2.5))
        );
        assert_eq!(
            InboundMessage::decode(json!({ "type": "zoom", "value": "fit" })),
            InboundMessage::Zoom(Scale::fit())
        );
    }

    #[test]
    fn unknown_kind_is_unrecognized() {
        assert_eq!(
            InboundMessage::decode(json!({ "type": "pan", "value": [1, 2] })),
            InboundMessage::Unrecognized
        );
    }

    #[test]
    fn malformed_payloads_are_unrecognized() {
        assert_eq!(
            InboundMessage::decode(json!({ "value": "512x512" })),
            InboundMessage::Unrecognized
        );
        assert_eq!(
            InboundMessage::decode(json!({ "type": "zoom", "value": "stretch" })),
            InboundMessage::Unrecognized
        );
        assert_eq!(InboundMessage::decode(json!(42)), InboundMessage::Unrecognized);
        assert_eq!(InboundMessage::parse("{not json"), InboundMessage::Unrecognized);
    }

    #[test]
    fn parse_reads_json_text() {
        assert_eq!(
            InboundMessage::parse(r#"{"type":"zoom","value":0.5}"#),
            InboundMessage::Zoom(Scale::factor(0.5))
        );
    }

    #[test]
    fn set_scale_envelope_shape() {
        let command = OutboundCommand::SetScale {
            scale: Scale::factor(1.5),
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({ "type": "setScale", "scale": 1.5 })
        );

        let fit = OutboundCommand::SetScale {
            scale: Scale::fit(),
        };
        assert_eq!(
            serde_json::to_value(&fit).unwrap(),
            json!({ "type": "setScale", "scale": "fit" })
        );
    }

    #[test]
    fn dimensions_display_verbatim() {
        assert_eq!(Dimensions::Text("512x512".into()).to_string(), "512x512");
        assert_eq!(Dimensions::Number(64.0).to_string(), "64");
    }
}
