use crate::{
    core::geo::LatLng, layers::animation::EasingType, rendering::style::StyleDescriptor,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pointer interaction with a single rendered feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeatureEvent {
    /// Pointer entered the element
    HoverStart,
    /// Pointer left the element
    HoverEnd,
    /// Element was clicked or otherwise activated
    Click,
}

/// Side effect requested by the interaction state machine.
///
/// Element-local effects are applied by the owning layer group; `FlyTo` is
/// forwarded to the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetStyle(StyleDescriptor),
    OpenPopup,
    ClosePopup,
    BringToFront,
    FlyTo {
        center: LatLng,
        zoom: f64,
        duration: Duration,
        easing: EasingType,
    },
}

/// Input aimed at the map itself rather than at one of its features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapInput {
    DoubleClick { at: LatLng },
}

/// Events emitted by the map host
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ViewChanged { center: LatLng, zoom: f64 },
    LayerAdd { layer_id: String },
    LayerRemove { layer_id: String },
    PopupOpen { layer_id: String, index: usize },
    PopupClose { layer_id: String, index: usize },
    BaseLayerChange { label: String },
    OverlayAdd { label: String },
    OverlayRemove { label: String },
    ControlAdd { kind: String },
    CoordinatesReported { text: String },
}

impl MapEvent {
    /// Name used when registering listeners
    pub fn kind(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::LayerAdd { .. } => "layeradd",
            MapEvent::LayerRemove { .. } => "layerremove",
            MapEvent::PopupOpen { .. } => "popupopen",
            MapEvent::PopupClose { .. } => "popupclose",
            MapEvent::BaseLayerChange { .. } => "baselayerchange",
            MapEvent::OverlayAdd { .. } => "overlayadd",
            MapEvent::OverlayRemove { .. } => "overlayremove",
            MapEvent::ControlAdd { .. } => "controladd",
            MapEvent::CoordinatesReported { .. } => "coordinates",
        }
    }
}
