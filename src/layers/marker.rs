use crate::{
    core::{
        constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE},
        geo::{LatLng, LatLngBounds},
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    ui::popup::Popup,
};
use serde::{Deserialize, Serialize};

/// Image used by an icon marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_url: String,
    pub icon_size: (u32, u32),
    /// Pixel of the image that sits on the marker position
    pub icon_anchor: (u32, u32),
    /// Offset of the popup tip relative to the anchor
    pub popup_anchor: (i32, i32),
}

impl Icon {
    /// Square icon anchored at its bottom center, popup just above it
    pub fn square(icon_url: impl Into<String>, size: u32) -> Self {
        Self {
            icon_url: icon_url.into(),
            icon_size: (size, size),
            icon_anchor: (size / 2, size),
            popup_anchor: (0, -(size as i32)),
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self {
            icon_url: "marker-icon.png".to_string(),
            icon_size: MARKER_ICON_SIZE,
            icon_anchor: MARKER_ICON_ANCHOR,
            popup_anchor: (1, -34),
        }
    }
}

/// A pin marker, optionally with a popup
pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    icon: Icon,
    title: Option<String>,
    popup: Option<Popup>,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            icon: Icon::default(),
            title: None,
            popup: None,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    /// Tooltip text shown by the browser on hover
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_popup(mut self, content: impl Into<String>) -> Self {
        self.popup = Some(Popup::new(self.position, content.into()));
        self
    }

    pub fn open_popup(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.show();
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "icon": self.icon,
            "title": self.title,
            "popup": self.popup.as_ref().map(|p| &p.content)
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::from_point(self.position))
    }
}
