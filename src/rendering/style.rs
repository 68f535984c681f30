//! Declarative styling for rendered features.
//!
//! A [`StyleDescriptor`] mirrors the path options of a web map circle marker
//! (`fillColor`, `color`, `weight`, ...). Every rendered element is created
//! with the default variant and swaps to the highlight variant while hovered.

use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Visual attributes of a circle marker or polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    /// Fill color as `#rgb` or `#rrggbb`
    pub fill_color: String,
    /// Border (stroke) color
    #[serde(rename = "color")]
    pub stroke_color: String,
    /// Border width in pixels
    pub weight: f64,
    /// Stroke opacity (0.0 to 1.0)
    pub opacity: f64,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f64,
    /// Circle radius in pixels, ignored by polylines
    pub radius: f64,
}

impl StyleDescriptor {
    /// The orange shop marker
    pub fn shop_default() -> Self {
        Self {
            fill_color: "#ff7800".to_string(),
            stroke_color: "#000".to_string(),
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
            radius: 6.0,
        }
    }

    /// The enlarged yellow marker shown under the pointer
    pub fn shop_highlight() -> Self {
        Self {
            fill_color: "#ffff00".to_string(),
            stroke_color: "#ffaa00".to_string(),
            weight: 2.0,
            opacity: 1.0,
            fill_opacity: 0.8,
            radius: 10.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for color in [&self.fill_color, &self.stroke_color] {
            if !is_hex_color(color) {
                return Err(MapError::InvalidStyle(format!("not a hex color: {color}")));
            }
        }
        for (field, value) in [("opacity", self.opacity), ("fillOpacity", self.fill_opacity)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MapError::InvalidStyle(format!(
                    "{field} must be within 0..=1, got {value}"
                )));
            }
        }
        if self.weight < 0.0 || self.radius < 0.0 {
            return Err(MapError::InvalidStyle(
                "weight and radius must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self::shop_default()
    }
}

/// Which of the two configured descriptors an element currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StyleVariant {
    #[default]
    Default,
    Highlight,
}

/// The pair of descriptors used by a feature renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub default: StyleDescriptor,
    pub highlight: StyleDescriptor,
}

impl StyleConfig {
    pub fn variant(&self, variant: StyleVariant) -> &StyleDescriptor {
        match variant {
            StyleVariant::Default => &self.default,
            StyleVariant::Highlight => &self.highlight,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.default.validate()?;
        self.highlight.validate()
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            default: StyleDescriptor::shop_default(),
            highlight: StyleDescriptor::shop_highlight(),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
