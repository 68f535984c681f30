//! # poimap
//!
//! A headless model of a Leaflet-style point-of-interest map.
//!
//! The crate owns the map state (viewport, base tile layers, feature layer
//! groups, popups and controls) and the behavior of every interaction, and
//! leaves painting to whichever front end consumes it. Feature data is
//! GeoJSON, fetched through a [`DataSource`](data::source::DataSource) and
//! rendered into styled, interactive elements by a
//! [`FeatureRenderer`](rendering::renderer::FeatureRenderer).

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use layers::{
    base::LayerTrait,
    group::{LayerGroup, RenderedFeature, Shape},
    marker::{Icon, Marker},
    tile::TileLayer,
    vector::{CircleMarker, Polyline},
};

pub use input::{Effect, FeatureEvent, MapEvent, MapInput};

pub use ui::{controls::Overlay, popup::Popup};

pub use rendering::{
    renderer::{category_equals, FeatureRenderer},
    style::{StyleConfig, StyleDescriptor},
};

pub use data::{
    geojson::{FeatureCollection, GeoJsonFeature},
    loader::{load_features, LoadOutcome},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid tile template: {0}")]
    InvalidTileTemplate(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
