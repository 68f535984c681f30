use crate::{
    core::{
        constants::DEFAULT_VIEWPORT_SIZE,
        geo::{LatLng, Point, TileCoord},
        viewport::Viewport,
    },
    input::{coordinates_text, Effect, EventManager, FeatureEvent, MapEvent, MapInput},
    layers::{
        animation::{EasingType, ViewTransition},
        base::LayerTrait, group::LayerGroup, manager::LayerManager,
        tile::TileLayer,
    },
    ui::{
        controls::{ControlManager, Overlay},
        scale::ScaleReading,
        search::SearchHit,
    },
    MapError, Result,
};
use std::time::Duration;

/// Base tiles sit below every feature layer
const BASE_LAYER_Z_INDEX: i32 = -100;

/// The map host: viewport, layers, controls and the event queue.
///
/// A `Map` is an ordinary owned value; several can live side by side.
pub struct Map {
    viewport: Viewport,
    layer_manager: LayerManager,
    event_manager: EventManager,
    controls: ControlManager,
    /// Ids of the base tile layers in the order they were added
    base_layers: Vec<String>,
    last_transition: Option<ViewTransition>,
}

impl Map {
    /// Map with the default viewport size
    pub fn initialize(center: LatLng, zoom: f64) -> Result<Self> {
        let (width, height) = DEFAULT_VIEWPORT_SIZE;
        Self::new(center, zoom, Point::new(width, height))
    }

    /// Fails with `InvalidCoordinates` for a center off the globe or a
    /// non-finite zoom, like `set_view`
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Result<Self> {
        check_view(center, zoom)?;
        Ok(Self {
            viewport: Viewport::new(center, zoom, size),
            layer_manager: LayerManager::new(),
            event_manager: EventManager::new(),
            controls: ControlManager::new(),
            base_layers: Vec::new(),
            last_transition: None,
        })
    }

    /// Adds a base tile layer and returns its id. The first base layer is
    /// shown; later ones start hidden until selected.
    pub fn add_base_layer(&mut self, url_template: &str, attribution: &str) -> Result<String> {
        let label = format!("Base layer {}", self.base_layers.len() + 1);
        self.add_named_base_layer(&label, url_template, attribution)
    }

    pub fn add_named_base_layer(
        &mut self,
        label: &str,
        url_template: &str,
        attribution: &str,
    ) -> Result<String> {
        let id = format!("base-{}", self.base_layers.len());
        let layer = TileLayer::new(id, label.to_string(), url_template, attribution)?;
        self.add_base_tile_layer(layer)
    }

    /// Adds a prepared tile layer as a base layer
    pub fn add_base_tile_layer(&mut self, mut layer: TileLayer) -> Result<String> {
        let id = layer.id().to_string();
        if self.base_layers.contains(&id) {
            return Err(MapError::Layer(format!("base layer {id} already exists")));
        }
        layer.set_visible(self.base_layers.is_empty());
        layer.set_z_index(BASE_LAYER_Z_INDEX);

        self.add_layer(Box::new(layer))?;
        self.base_layers.push(id.clone());
        Ok(id)
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        self.layer_manager.add_layer(layer)?;
        log::debug!("added layer {}", layer_id);
        self.event_manager.emit(MapEvent::LayerAdd { layer_id });
        Ok(())
    }

    /// Adds a rendered feature group and returns its id
    pub fn add_group(&mut self, group: LayerGroup) -> Result<String> {
        let id = group.id().to_string();
        self.add_layer(Box::new(group))?;
        Ok(id)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        if self.layer_manager.remove_layer(layer_id).is_none() {
            return Err(MapError::UnknownLayer(layer_id.to_string()));
        }
        self.base_layers.retain(|id| id != layer_id);
        self.event_manager.emit(MapEvent::LayerRemove {
            layer_id: layer_id.to_string(),
        });
        Ok(())
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn group(&self, layer_id: &str) -> Option<&LayerGroup> {
        self.layer_manager.get_as::<LayerGroup>(layer_id)
    }

    /// Feature groups in render order
    pub fn groups(&self) -> Vec<&LayerGroup> {
        self.layer_manager
            .layers()
            .into_iter()
            .filter_map(|layer| layer.as_any().downcast_ref::<LayerGroup>())
            .collect()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layer_manager
    }

    pub fn base_layer_ids(&self) -> &[String] {
        &self.base_layers
    }

    /// The base layer currently shown
    pub fn active_base_layer(&self) -> Option<&TileLayer> {
        self.base_layers
            .iter()
            .filter_map(|id| self.layer_manager.get_as::<TileLayer>(id))
            .find(|layer| layer.is_visible())
    }

    /// URL of a tile of the active base layer
    pub fn tile_url(&self, coord: TileCoord) -> Option<String> {
        self.active_base_layer().map(|layer| layer.tile_url(coord))
    }

    /// Registers a control. A control of the same kind is replaced.
    pub fn add_overlay(&mut self, overlay: Overlay) -> Result<()> {
        if let Overlay::Layers(control) = &overlay {
            for id in control.base_layer_ids() {
                if !self.base_layers.iter().any(|base| base == id) {
                    return Err(MapError::UnknownLayer(id.to_string()));
                }
            }
        }

        let kind = overlay.kind();
        if self.controls.add(overlay).is_some() {
            log::debug!("replaced {} control", kind);
        }
        self.event_manager.emit(MapEvent::ControlAdd {
            kind: kind.to_string(),
        });
        Ok(())
    }

    pub fn controls(&self) -> &ControlManager {
        &self.controls
    }

    /// What the scale bar shows for the current view, if there is one
    pub fn scale_reading(&self) -> Option<ScaleReading> {
        self.controls
            .scale()
            .map(|scale| scale.measure(&self.viewport))
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        check_view(center, zoom)?;
        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        if self.viewport.center != old_center || self.viewport.zoom != old_zoom {
            self.event_manager.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
        Ok(())
    }

    /// Animated recentering. The end view is applied at once; the recorded
    /// transition describes the path.
    pub fn fly_to(&mut self, center: LatLng, zoom: f64, duration: Duration) -> Result<()> {
        self.fly_to_with_easing(center, zoom, duration, EasingType::default())
    }

    pub fn fly_to_with_easing(
        &mut self,
        center: LatLng,
        zoom: f64,
        duration: Duration,
        easing: EasingType,
    ) -> Result<()> {
        check_coordinates(center)?;
        let from_center = self.viewport.center;
        let from_zoom = self.viewport.zoom;

        self.set_view(center, zoom)?;
        self.last_transition = Some(ViewTransition::new(
            from_center,
            self.viewport.center,
            from_zoom,
            self.viewport.zoom,
            duration,
        )
        .with_easing(easing));
        Ok(())
    }

    /// The path of the most recent `fly_to`
    pub fn last_transition(&self) -> Option<&ViewTransition> {
        self.last_transition.as_ref()
    }

    /// Runs a pointer event on one element of a feature group and applies
    /// the resulting map-level effects
    pub fn dispatch_feature_event(
        &mut self,
        group_id: &str,
        index: usize,
        event: FeatureEvent,
    ) -> Result<Vec<Effect>> {
        let group = self
            .layer_manager
            .get_as_mut::<LayerGroup>(group_id)
            .ok_or_else(|| MapError::UnknownLayer(group_id.to_string()))?;
        let effects = group.handle_event(index, event)?;

        for effect in &effects {
            match effect {
                Effect::FlyTo {
                    center,
                    zoom,
                    duration,
                    easing,
                } => self.fly_to_with_easing(*center, *zoom, *duration, *easing)?,
                Effect::OpenPopup => self.event_manager.emit(MapEvent::PopupOpen {
                    layer_id: group_id.to_string(),
                    index,
                }),
                Effect::ClosePopup => self.event_manager.emit(MapEvent::PopupClose {
                    layer_id: group_id.to_string(),
                    index,
                }),
                Effect::SetStyle(_) | Effect::BringToFront => {}
            }
        }
        Ok(effects)
    }

    pub fn handle_input(&mut self, input: MapInput) -> Result<()> {
        match input {
            MapInput::DoubleClick { at } => {
                check_coordinates(at)?;
                self.event_manager.emit(MapEvent::CoordinatesReported {
                    text: coordinates_text(at),
                });
            }
        }
        Ok(())
    }

    /// Matches of the search control against its feature group
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let control = self
            .controls
            .search()
            .ok_or_else(|| MapError::Config("no search control on the map".to_string()))?;
        let group = self
            .group(&control.layer_id)
            .ok_or_else(|| MapError::UnknownLayer(control.layer_id.clone()))?;
        Ok(control.search(group, query))
    }

    /// Flies to the first search hit, if any
    pub fn search_and_fly(&mut self, query: &str) -> Result<Option<SearchHit>> {
        let Some(hit) = self.search(query)?.into_iter().next() else {
            return Ok(None);
        };
        let fly_to = self
            .controls
            .search()
            .map(|control| control.fly_to)
            .unwrap_or_default();
        self.fly_to_with_easing(hit.location, fly_to.zoom, fly_to.duration(), fly_to.easing)?;
        Ok(Some(hit))
    }

    /// Shows the base layer registered under `label` in the layer control and
    /// hides every other base layer
    pub fn select_base_layer(&mut self, label: &str) -> Result<()> {
        let selected = self
            .controls
            .layers()
            .ok_or_else(|| MapError::UnknownLayer(label.to_string()))?
            .base_layer_id(label)?
            .to_string();

        for id in &self.base_layers {
            let visible = *id == selected;
            self.layer_manager
                .with_layer_mut(id, |layer| layer.set_visible(visible));
        }
        self.event_manager.emit(MapEvent::BaseLayerChange {
            label: label.to_string(),
        });
        Ok(())
    }

    /// Shows or hides the overlay registered under `label`
    pub fn set_overlay_visible(&mut self, label: &str, visible: bool) -> Result<()> {
        let layer_id = self
            .controls
            .layers()
            .ok_or_else(|| MapError::UnknownLayer(label.to_string()))?
            .overlay_id(label)?
            .to_string();

        let changed = self
            .layer_manager
            .with_layer_mut(&layer_id, |layer| {
                let changed = layer.is_visible() != visible;
                layer.set_visible(visible);
                changed
            })
            .ok_or_else(|| MapError::UnknownLayer(layer_id.clone()))?;

        if changed {
            let label = label.to_string();
            self.event_manager.emit(if visible {
                MapEvent::OverlayAdd { label }
            } else {
                MapEvent::OverlayRemove { label }
            });
        }
        Ok(())
    }

    pub fn on<F>(&mut self, event_kind: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_kind, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn center(&self) -> LatLng {
        self.viewport.center
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }
}

fn check_view(center: LatLng, zoom: f64) -> Result<()> {
    check_coordinates(center)?;
    if zoom.is_finite() {
        Ok(())
    } else {
        Err(MapError::InvalidCoordinates(format!("zoom {}", zoom)))
    }
}

fn check_coordinates(point: LatLng) -> Result<()> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(MapError::InvalidCoordinates(format!(
            "{}, {}",
            point.lat, point.lng
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            config::FlyToConfig,
            constants::{OPENTOPOMAP_ATTRIBUTION, OPENTOPOMAP_TILE_URL, OSM_ATTRIBUTION, OSM_TILE_URL},
        },
        data::geojson::FeatureCollection,
        rendering::{renderer::FeatureRenderer, style::StyleConfig},
        ui::{layer_control::LayerControl, scale::ScaleControl, search::SearchControl},
    };

    const SHOPS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Fashion Boutique", "address": "Getreidegasse 12", "type": "clothing"},
         "geometry": {"type": "Point", "coordinates": [13.0438, 47.8005]}},
        {"type": "Feature", "properties": {"name": "Urban Outfitters", "type": "sports"},
         "geometry": {"type": "Point", "coordinates": [13.0476, 47.8121]}}
    ]}"#;

    fn salzburg() -> Map {
        Map::initialize(LatLng::new(47.8095, 13.0550), 14.0).unwrap()
    }

    fn with_shops(map: &mut Map) -> String {
        let collection = FeatureCollection::from_str(SHOPS).unwrap();
        let group = FeatureRenderer::new(StyleConfig::default())
            .named("shops", "Shops")
            .render(&collection);
        map.add_group(group).unwrap()
    }

    #[test]
    fn test_initialize() {
        let map = salzburg();
        assert_eq!(map.center(), LatLng::new(47.8095, 13.0550));
        assert_eq!(map.zoom(), 14.0);
        assert!(map.layers().is_empty());
        assert!(map.last_transition().is_none());
    }

    #[test]
    fn test_initialize_rejects_invalid_view() {
        assert!(matches!(
            Map::initialize(LatLng::new(f64::NAN, 13.0550), 14.0),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            Map::initialize(LatLng::new(95.0, 13.0550), 14.0),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            Map::initialize(LatLng::new(47.8095, 13.0550), f64::NAN),
            Err(MapError::InvalidCoordinates(_))
        ));

        let mut map = salzburg();
        assert!(map.set_view(map.center(), f64::INFINITY).is_err());
        assert_eq!(map.zoom(), 14.0);
    }

    #[test]
    fn test_first_base_layer_is_visible() {
        let mut map = salzburg();
        let osm = map.add_base_layer(OSM_TILE_URL, OSM_ATTRIBUTION).unwrap();
        let topo = map
            .add_base_layer(OPENTOPOMAP_TILE_URL, OPENTOPOMAP_ATTRIBUTION)
            .unwrap();

        assert!(map.get_layer(&osm).unwrap().is_visible());
        assert!(!map.get_layer(&topo).unwrap().is_visible());
        assert_eq!(map.active_base_layer().unwrap().attribution(), OSM_ATTRIBUTION);
        assert_eq!(
            map.tile_url(TileCoord::new(8786, 5708, 14)).unwrap(),
            "https://b.tile.openstreetmap.org/14/8786/5708.png"
        );
    }

    #[test]
    fn test_bad_template_is_rejected() {
        let mut map = salzburg();
        let result = map.add_base_layer("https://tiles.example.org/{z}.png", "");
        assert!(matches!(result, Err(MapError::InvalidTileTemplate(_))));
        assert!(map.base_layer_ids().is_empty());
    }

    #[test]
    fn test_fly_to_records_transition() {
        let mut map = salzburg();
        let target = LatLng::new(47.8005, 13.0438);
        map.fly_to(target, 16.0, Duration::from_millis(1500)).unwrap();

        assert_eq!(map.center(), target);
        assert_eq!(map.zoom(), 16.0);
        let transition = map.last_transition().unwrap();
        assert_eq!(transition.from_center, LatLng::new(47.8095, 13.0550));
        assert_eq!(transition.from_zoom, 14.0);
        assert_eq!(transition.duration, Duration::from_millis(1500));

        let events = map.process_events();
        assert_eq!(
            events,
            vec![MapEvent::ViewChanged {
                center: target,
                zoom: 16.0
            }]
        );
    }

    #[test]
    fn test_click_uses_configured_easing() {
        let mut map = salzburg();
        let collection = FeatureCollection::from_str(SHOPS).unwrap();
        let group = FeatureRenderer::new(StyleConfig::default())
            .named("shops", "Shops")
            .with_fly_to(FlyToConfig {
                easing: EasingType::Linear,
                ..FlyToConfig::default()
            })
            .render(&collection);
        let shops = map.add_group(group).unwrap();

        map.dispatch_feature_event(&shops, 0, FeatureEvent::Click)
            .unwrap();

        let transition = map.last_transition().unwrap();
        assert_eq!(transition.easing, EasingType::Linear);
        let halfway = transition.sample(Duration::from_millis(750));
        assert!((halfway.progress - 0.5).abs() < 1e-9);
        assert!((halfway.zoom - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_fly_to_clamps_zoom() {
        let mut map = salzburg();
        map.fly_to(LatLng::new(47.8, 13.0), 25.0, Duration::ZERO).unwrap();
        assert_eq!(map.zoom(), 18.0);
        assert!(map
            .fly_to(LatLng::new(95.0, 13.0), 16.0, Duration::ZERO)
            .is_err());
    }

    #[test]
    fn test_click_flies_to_feature() {
        let mut map = salzburg();
        let shops = with_shops(&mut map);
        map.dispatch_feature_event(&shops, 0, FeatureEvent::Click)
            .unwrap();

        assert_eq!(map.center(), LatLng::new(47.8005, 13.0438));
        assert_eq!(map.zoom(), 16.0);
        assert_eq!(
            map.last_transition().unwrap().duration,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_hover_emits_popup_events() {
        let mut map = salzburg();
        let shops = with_shops(&mut map);
        map.process_events();

        map.dispatch_feature_event(&shops, 1, FeatureEvent::HoverStart)
            .unwrap();
        map.dispatch_feature_event(&shops, 1, FeatureEvent::HoverEnd)
            .unwrap();

        let kinds: Vec<&str> = map.process_events().iter().map(MapEvent::kind).collect();
        assert_eq!(kinds, vec!["popupopen", "popupclose"]);
    }

    #[test]
    fn test_dispatch_to_unknown_group() {
        let mut map = salzburg();
        assert!(matches!(
            map.dispatch_feature_event("nope", 0, FeatureEvent::HoverStart),
            Err(MapError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_double_click_reports_coordinates() {
        let mut map = salzburg();
        map.handle_input(MapInput::DoubleClick {
            at: LatLng::new(47.8095, 13.055),
        })
        .unwrap();

        assert_eq!(
            map.process_events(),
            vec![MapEvent::CoordinatesReported {
                text: "Coordinates: 47.80950, 13.05500".to_string()
            }]
        );
    }

    #[test]
    fn test_base_layer_switching_is_exclusive() {
        let mut map = salzburg();
        let osm = map.add_base_layer(OSM_TILE_URL, OSM_ATTRIBUTION).unwrap();
        let topo = map
            .add_base_layer(OPENTOPOMAP_TILE_URL, OPENTOPOMAP_ATTRIBUTION)
            .unwrap();
        let shops = with_shops(&mut map);
        map.add_overlay(Overlay::Layers(
            LayerControl::new()
                .with_base_layer("Open Street Map", &osm)
                .with_base_layer("Open Topo Map", &topo)
                .with_overlay("Shops", &shops),
        ))
        .unwrap();

        map.select_base_layer("Open Topo Map").unwrap();
        assert!(!map.get_layer(&osm).unwrap().is_visible());
        assert!(map.get_layer(&topo).unwrap().is_visible());

        map.set_overlay_visible("Shops", false).unwrap();
        assert!(!map.get_layer(&shops).unwrap().is_visible());

        assert!(matches!(
            map.select_base_layer("Satellite"),
            Err(MapError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_layer_control_needs_known_base_layers() {
        let mut map = salzburg();
        let result = map.add_overlay(Overlay::Layers(
            LayerControl::new().with_base_layer("Open Street Map", "osm"),
        ));
        assert!(matches!(result, Err(MapError::UnknownLayer(id)) if id == "osm"));
    }

    #[test]
    fn test_search_and_fly() {
        let mut map = salzburg();
        let shops = with_shops(&mut map);
        map.add_overlay(Overlay::Search(SearchControl::new(&shops)))
            .unwrap();

        let hit = map.search_and_fly("urban").unwrap().unwrap();
        assert_eq!(hit.label, "Urban Outfitters");
        assert_eq!(map.center(), LatLng::new(47.8121, 13.0476));
        assert_eq!(map.zoom(), 16.0);

        assert!(map.search_and_fly("bakery").unwrap().is_none());
    }

    #[test]
    fn test_scale_reading_follows_zoom() {
        let mut map = salzburg();
        assert!(map.scale_reading().is_none());
        map.add_overlay(Overlay::Scale(ScaleControl::default()))
            .unwrap();
        assert_eq!(map.scale_reading().unwrap().label, "500 m");

        map.set_view(map.center(), 10.0).unwrap();
        assert_eq!(map.scale_reading().unwrap().label, "10 km");
    }
}
