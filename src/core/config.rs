//! Configuration for the map host and the feature pipeline
//!
//! Every struct deserializes with `#[serde(default)]`, so a configuration
//! file only needs the keys it changes. The defaults reproduce the Salzburg
//! clothing shop map.

use crate::{
    core::{
        constants::{
            DEFAULT_CENTER, DEFAULT_DATA_PATH, DEFAULT_ZOOM, FALLBACK_POPUP,
            FLY_TO_DURATION_SECS, FLY_TO_ZOOM, OSM_ATTRIBUTION, OSM_TILE_URL,
        },
        geo::LatLng,
    },
    layers::animation::EasingType,
    rendering::style::StyleConfig,
    ui::popup::PopupOptions,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Animated recentering used by clicks and search hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyToConfig {
    pub zoom: f64,
    pub duration_secs: f64,
    pub easing: EasingType,
}

impl FlyToConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs.max(0.0))
    }
}

impl Default for FlyToConfig {
    fn default() -> Self {
        Self {
            zoom: FLY_TO_ZOOM,
            duration_secs: FLY_TO_DURATION_SECS,
            easing: EasingType::EaseInOut,
        }
    }
}

/// The single marker shown when the feature data cannot be loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub location: LatLng,
    pub popup: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            location: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            popup: FALLBACK_POPUP.to_string(),
        }
    }
}

/// Base tile layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseLayerConfig {
    pub label: String,
    pub url_template: String,
    pub attribution: String,
}

impl Default for BaseLayerConfig {
    fn default() -> Self {
        Self {
            label: "Open Street Map".to_string(),
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Everything needed to build and populate a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub base_layer: BaseLayerConfig,
    /// Path or `http(s)://` URL of the GeoJSON document
    pub data_source: String,
    pub style: StyleConfig,
    pub popup: PopupOptions,
    pub fly_to: FlyToConfig,
    pub fallback: FallbackConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            base_layer: BaseLayerConfig::default(),
            data_source: DEFAULT_DATA_PATH.to_string(),
            style: StyleConfig::default(),
            popup: PopupOptions::default(),
            fly_to: FlyToConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        for (what, point) in [("center", self.center), ("fallback", self.fallback.location)] {
            if !point.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "{what}: {}, {}",
                    point.lat, point.lng
                )));
            }
        }
        if !self.fly_to.duration_secs.is_finite() || self.fly_to.duration_secs < 0.0 {
            return Err(MapError::Config(format!(
                "fly_to.duration_secs must be a non-negative number, got {}",
                self.fly_to.duration_secs
            )));
        }
        self.style.validate()
    }
}
