//! Map builder for fluent API configuration
//!
//! Collects the viewport, base layers and controls of a map and checks them
//! all at `build()`, so a half-configured map is never handed out.

use crate::{
    core::{
        config::MapConfig,
        constants::{
            DEFAULT_VIEWPORT_SIZE, MAX_ZOOM, MIN_ZOOM, OPENTOPOMAP_ATTRIBUTION,
            OPENTOPOMAP_TILE_URL,
        },
        geo::{LatLng, Point},
        map::Map,
    },
    rendering::style::StyleConfig,
    ui::{
        controls::Overlay, layer_control::LayerControl, legend::LegendControl,
        scale::ScaleControl,
    },
    Result,
};

struct PendingBaseLayer {
    label: String,
    url_template: String,
    attribution: String,
}

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    center: LatLng,
    zoom: f64,
    size: Point,
    min_zoom: f64,
    max_zoom: f64,
    base_layers: Vec<PendingBaseLayer>,
    overlays: Vec<Overlay>,
    /// Add a layer switcher listing every base layer
    layer_switcher: bool,
}

impl MapBuilder {
    pub fn new() -> Self {
        let (width, height) = DEFAULT_VIEWPORT_SIZE;
        Self {
            center: LatLng::default(),
            zoom: 0.0,
            size: Point::new(width, height),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            base_layers: Vec::new(),
            overlays: Vec::new(),
            layer_switcher: false,
        }
    }

    /// Builder seeded with the view and base layer of a configuration
    pub fn from_config(config: &MapConfig) -> Self {
        let base = &config.base_layer;
        Self::new()
            .with_center_and_zoom(config.center, config.zoom)
            .with_base_layer(&base.label, &base.url_template, &base.attribution)
    }

    /// The clothing shop demo: OpenStreetMap and OpenTopoMap base layers, a
    /// layer switcher, scale bar and legend
    pub fn shop_demo(config: &MapConfig) -> Self {
        Self::from_config(config)
            .with_base_layer("Open Topo Map", OPENTOPOMAP_TILE_URL, OPENTOPOMAP_ATTRIBUTION)
            .with_layer_switcher()
            .with_overlay(Overlay::Scale(ScaleControl::default()))
            .with_overlay(Overlay::Legend(legend_for(&config.style)))
    }

    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    pub fn with_size(mut self, size: Point) -> Self {
        self.size = size;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Adds a base layer; the first one added is shown
    pub fn with_base_layer(mut self, label: &str, url_template: &str, attribution: &str) -> Self {
        self.base_layers.push(PendingBaseLayer {
            label: label.to_string(),
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
        self
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlays.push(overlay);
        self
    }

    pub fn with_layer_switcher(mut self) -> Self {
        self.layer_switcher = true;
        self
    }

    pub fn build(self) -> Result<Map> {
        let mut map = Map::new(self.center, self.zoom, self.size)?;
        map.viewport_mut().set_zoom_limits(self.min_zoom, self.max_zoom);
        map.set_view(self.center, self.zoom)?;

        let mut switcher = LayerControl::new();
        for base in &self.base_layers {
            let id = map.add_named_base_layer(&base.label, &base.url_template, &base.attribution)?;
            switcher = switcher.with_base_layer(&base.label, id);
        }
        if self.layer_switcher {
            map.add_overlay(Overlay::Layers(switcher))?;
        }
        for overlay in self.overlays {
            map.add_overlay(overlay)?;
        }

        // construction events are not interesting to listeners
        map.process_events();
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn legend_for(styles: &StyleConfig) -> LegendControl {
    LegendControl::from_styles("Legend", styles)
}
