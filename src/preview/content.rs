// SPDX-License-Identifier: MPL-2.0
//! Bootstrap document served to the rendering surface.
//!
//! The document loads the bundled stylesheet and script, restricts what the
//! surface may fetch to the preview's resource roots, and hands the script a
//! JSON settings blob through a `data-settings` attribute.

use super::version::ContentVersion;
use crate::application::port::Surface;
use crate::config::defaults::{SETTINGS_ELEMENT_ID, VERSION_QUERY_PARAM};
use crate::config::Config;
use crate::domain::resource::{ResourceLocator, ResourceRoots};
use serde::Serialize;

/// Bundled asset paths, relative to the extension root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAssets {
    pub stylesheet: String,
    pub script: String,
}

impl DocumentAssets {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            stylesheet: config.stylesheet().to_string(),
            script: config.script().to_string(),
        }
    }
}

impl Default for DocumentAssets {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Settings read by the bootstrap script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSettings {
    pub is_mac: bool,
    /// Surface-addressable image source.
    pub src: String,
}

/// Everything needed to render one bootstrap document.
pub struct BootstrapDocument<'a> {
    pub surface: &'a dyn Surface,
    pub roots: &'a ResourceRoots,
    pub resource: &'a ResourceLocator,
    pub assets: &'a DocumentAssets,
    pub title: &'a str,
    pub lang: &'a str,
    pub is_mac: bool,
}

impl BootstrapDocument<'_> {
    #[must_use]
    pub fn settings(&self, version: ContentVersion) -> PreviewSettings {
        PreviewSettings {
            is_mac: self.is_mac,
            src: resource_src(self.surface, self.resource, version),
        }
    }

    #[must_use]
    pub fn render(&self, version: ContentVersion) -> String {
        let settings = serde_json::to_string(&self.settings(version)).unwrap_or_default();
        let stylesheet = self.asset_uri(&self.assets.stylesheet);
        let script = self.asset_uri(&self.assets.script);
        let csp = content_security_policy(self.surface, self.roots);

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
	<meta charset="UTF-8">
	<meta name="viewport" content="width=device-width, initial-scale=1.0">
	<meta http-equiv="Content-Security-Policy" content="{csp}">
	<title>{title}</title>
	<link rel="stylesheet" href="{stylesheet}" type="text/css" media="screen">
	<meta id="{settings_id}" data-settings="{settings}">
</head>
<body class="container image scale-to-fit">
	<div class="loading"></div>
	<script src="{script}"></script>
</body>
</html>"#,
            lang = escape_attribute(self.lang),
            csp = escape_attribute(&csp),
            title = escape_attribute(self.title),
            stylesheet = escape_attribute(&stylesheet),
            settings_id = SETTINGS_ELEMENT_ID,
            settings = escape_attribute(&settings),
            script = escape_attribute(&script),
        )
    }

    fn asset_uri(&self, asset: &str) -> String {
        let local = self.roots.extension_root().join_asset(asset);
        self.surface.as_addressable_uri(&local).to_string()
    }
}

/// Image source handed to the surface.
///
/// Inline `data:` locators pass through untouched. Anything else is rewritten
/// into its surface-addressable form and tagged with the version token.
#[must_use]
pub fn resource_src(
    surface: &dyn Surface,
    resource: &ResourceLocator,
    version: ContentVersion,
) -> String {
    if resource.is_data() {
        return resource.to_string();
    }
    surface
        .as_addressable_uri(resource)
        .with_query_param(VERSION_QUERY_PARAM, &version.to_string())
        .to_string()
}

/// Policy limiting every fetch to the surface-addressable resource roots.
///
/// Only hierarchical roots become sources. An inline `data:` resource is its
/// own root and is already covered by `img-src data:`.
#[must_use]
pub fn content_security_policy(surface: &dyn Surface, roots: &ResourceRoots) -> String {
    let sources = roots
        .iter()
        .filter(|root| root.is_hierarchical())
        .map(|root| surface.as_addressable_uri(root).to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "default-src 'none'; img-src {sources} data:; script-src {sources}; style-src {sources};"
    )
}

/// Escapes a value for use inside a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::HeadlessSurface;

    const ORIGIN: &str = "https://surface.test";

    fn loc(input: &str) -> ResourceLocator {
        ResourceLocator::parse(input).expect("valid locator")
    }

    fn render_for(resource: &ResourceLocator) -> (String, PreviewSettings) {
        let surface = HeadlessSurface::with_resource_origin(ORIGIN);
        let roots = ResourceRoots::new(resource, &loc("file:///ext"));
        let assets = DocumentAssets::default();
        let document = BootstrapDocument {
            surface: &surface,
            roots: &roots,
            resource,
            assets: &assets,
            title: "Image Preview",
            lang: "en-US",
            is_mac: false,
        };
        let version = ContentVersion::new(1_700_000_000_000);
        (document.render(version), document.settings(version))
    }

    #[test]
    fn file_source_is_rewritten_and_versioned() {
        let (_, settings) = render_for(&loc("file:///proj/img/a.png"));
        assert_eq!(
            settings.src,
            "https://surface.test/proj/img/a.png?version=1700000000000"
        );
        assert!(!settings.is_mac);
    }

    #[test]
    fn data_source_passes_through_unmodified() {
        let data = loc("data:image/png;base64,iVBORw0KGgo=");
        let (_, settings) = render_for(&data);
        assert_eq!(settings.src, data.as_str());
        assert!(!settings.src.contains("version="));
    }

    #[test]
    fn document_references_assets_and_settings() {
        let (html, settings) = render_for(&loc("file:///proj/img/a.png"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="https://surface.test/ext/media/main.css""#));
        assert!(html.contains(r#"<script src="https://surface.test/ext/media/main.js"></script>"#));
        assert!(html.contains(r#"<meta id="image-preview-settings" data-settings=""#));

        let attribute = escape_attribute(&serde_json::to_string(&settings).unwrap());
        assert!(html.contains(&attribute));
        assert_eq!(html.matches("<script").count(), 1);
        assert_eq!(html.matches("rel=\"stylesheet\"").count(), 1);
    }

    #[test]
    fn policy_is_limited_to_resource_roots() {
        let surface = HeadlessSurface::with_resource_origin(ORIGIN);
        let roots = ResourceRoots::new(&loc("file:///proj/img/a.png"), &loc("file:///ext"));
        assert_eq!(
            content_security_policy(&surface, &roots),
            "default-src 'none'; \
             img-src https://surface.test/proj/img/ https://surface.test/ext data:; \
             script-src https://surface.test/proj/img/ https://surface.test/ext; \
             style-src https://surface.test/proj/img/ https://surface.test/ext;"
        );
    }

    fn directive<'a>(policy: &'a str, name: &str) -> Option<&'a str> {
        policy
            .split(';')
            .map(str::trim)
            .find(|directive| directive.split_whitespace().next() == Some(name))
    }

    #[test]
    fn data_resource_keeps_extension_root_in_policy() {
        let surface = HeadlessSurface::with_resource_origin(ORIGIN);
        let data = loc("data:image/png;base64,iVBORw0KGgo=");
        let roots = ResourceRoots::new(&data, &loc("file:///ext/"));
        let policy = content_security_policy(&surface, &roots);

        assert_eq!(
            directive(&policy, "script-src"),
            Some("script-src https://surface.test/ext/")
        );
        assert_eq!(
            directive(&policy, "style-src"),
            Some("style-src https://surface.test/ext/")
        );
        assert_eq!(
            directive(&policy, "img-src"),
            Some("img-src https://surface.test/ext/ data:")
        );
        assert!(!policy.contains("base64"));
    }

    #[test]
    fn data_document_embeds_payload_only_as_source() {
        let data = loc("data:image/png;base64,iVBORw0KGgo=");
        let (html, settings) = render_for(&data);
        assert_eq!(settings.src, data.as_str());
        assert_eq!(html.matches("iVBORw0KGgo=").count(), 1);
        assert!(html.contains(r#"<script src="https://surface.test/ext/media/main.js"></script>"#));
    }

    #[test]
    fn settings_serialize_with_camel_case_keys() {
        let settings = PreviewSettings {
            is_mac: true,
            src: "https://surface.test/a.png?version=1".into(),
        };
        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"isMac":true,"src":"https://surface.test/a.png?version=1"}"#
        );
    }

    #[test]
    fn escape_attribute_handles_quotes_and_markup() {
        assert_eq!(
            escape_attribute(r#"{"a":"<b>&"}"#),
            "{&quot;a&quot;:&quot;&lt;b&gt;&amp;&quot;}"
        );
    }
}
