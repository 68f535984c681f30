//! Prelude module for common poimap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use poimap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{BaseLayerConfig, FallbackConfig, FlyToConfig, MapConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use crate::layers::{
    animation::{EasingType, ViewFrame, ViewTransition},
    base::{LayerTrait, LayerType},
    group::{LayerGroup, RenderedFeature, Shape},
    manager::LayerManager,
    marker::{Icon, Marker},
    tile::TileLayer,
    vector::{CircleMarker, Polyline},
};

pub use crate::data::{
    geojson::{FeatureCollection, FeatureProperties, GeoJsonFeature, GeoJsonGeometry},
    loader::{load_all, load_features, LoadOutcome},
    source::{DataSource, HttpSource, InlineSource},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::data::source::{source_for, FileSource};

pub use crate::input::{
    handle_feature_event, Effect, EventManager, FeatureEvent, InteractionContext,
    InteractionState, MapEvent, MapInput, Transition,
};

pub use crate::rendering::{
    renderer::{category_equals, FeatureRenderer},
    style::{StyleConfig, StyleDescriptor, StyleVariant},
};

pub use crate::ui::{
    controls::{ControlManager, ControlPosition, Overlay},
    layer_control::LayerControl,
    legend::LegendControl,
    popup::{Popup, PopupOptions},
    scale::{ScaleControl, ScaleReading},
    search::{SearchControl, SearchHit},
};

pub use crate::{Error as MapError, Result};

pub use std::{
    collections::VecDeque,
    sync::Arc,
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
