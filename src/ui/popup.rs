use crate::{core::geo::LatLng, data::geojson::FeatureProperties};
use serde::{Deserialize, Serialize};

/// Separator between popup lines
const LINE_BREAK: &str = "<br>";

/// Controls which optional parts end up in a feature popup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupOptions {
    /// Wrap the name in `<b>`
    pub bold_name: bool,
    /// Append `Coordinates: lat, lng` as the last line
    pub include_coordinates: bool,
}

/// A popup bound to one rendered element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub content: String,
    pub anchor: LatLng,
    pub open: bool,
}

impl Popup {
    pub fn new(anchor: LatLng, content: String) -> Self {
        Self {
            content,
            anchor,
            open: false,
        }
    }

    /// Builds the popup for a feature, or `None` when it has no name
    pub fn for_feature(
        properties: &FeatureProperties,
        anchor: LatLng,
        options: &PopupOptions,
    ) -> Option<Self> {
        build_content(properties, anchor, options).map(|content| Self::new(anchor, content))
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }
}

/// Joins name, address, hours and coordinates, in that order.
///
/// Only the name is required. Blank optional values are left out.
pub fn build_content(
    properties: &FeatureProperties,
    position: LatLng,
    options: &PopupOptions,
) -> Option<String> {
    let name = present(&properties.name)?;

    let mut lines = Vec::with_capacity(4);
    if options.bold_name {
        lines.push(format!("<b>{}</b>", escape_html(name)));
    } else {
        lines.push(escape_html(name));
    }
    lines.extend(present(&properties.address).map(escape_html));
    lines.extend(present(&properties.hours).map(escape_html));
    if options.include_coordinates {
        lines.push(format!(
            "Coordinates: {:.5}, {:.5}",
            position.lat, position.lng
        ));
    }

    Some(lines.join(LINE_BREAK))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Escapes text for inclusion in popup HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
