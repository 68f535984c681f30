use crate::{
    core::{
        config::{FlyToConfig, MapConfig},
        geo::LatLng,
    },
    data::geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry},
    layers::{
        group::{LayerGroup, RenderedFeature, Shape},
        marker::{Icon, Marker},
        vector::{CircleMarker, Polyline},
    },
    prelude::HashMap,
    rendering::style::StyleConfig,
    ui::popup::{Popup, PopupOptions},
};

/// Decides whether a feature goes into the rendered group
pub type FeatureFilter = Box<dyn Fn(&GeoJsonFeature) -> bool + Send + Sync>;

/// Filter keeping features whose `type` property equals `category`
pub fn category_equals(
    category: impl Into<String>,
) -> impl Fn(&GeoJsonFeature) -> bool + Send + Sync + 'static {
    let category = category.into();
    move |feature| feature.category() == Some(category.as_str())
}

/// Turns a feature collection into a group of styled, interactive elements
pub struct FeatureRenderer {
    id: String,
    name: String,
    styles: StyleConfig,
    popup: PopupOptions,
    fly_to: FlyToConfig,
    filter: Option<FeatureFilter>,
    /// Categories that get an icon marker instead of a circle
    icons: HashMap<String, Icon>,
}

impl FeatureRenderer {
    pub fn new(styles: StyleConfig) -> Self {
        Self {
            id: "features".to_string(),
            name: "Features".to_string(),
            styles,
            popup: PopupOptions::default(),
            fly_to: FlyToConfig::default(),
            filter: None,
            icons: HashMap::default(),
        }
    }

    /// Renderer using the style, popup and fly-to settings of a map config
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.style.clone())
            .with_popup_options(config.popup.clone())
            .with_fly_to(config.fly_to)
    }

    /// Sets the id and display name of the produced layer group
    pub fn named(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.id = id.into();
        self.name = name.into();
        self
    }

    pub fn with_popup_options(mut self, popup: PopupOptions) -> Self {
        self.popup = popup;
        self
    }

    pub fn with_fly_to(mut self, fly_to: FlyToConfig) -> Self {
        self.fly_to = fly_to;
        self
    }

    /// Sets a filter function to include or exclude features
    pub fn with_filter<F>(mut self, filter_fn: F) -> Self
    where
        F: Fn(&GeoJsonFeature) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter_fn));
        self
    }

    /// Registers an icon for point features of a category
    pub fn with_category_icon(mut self, category: impl Into<String>, icon: Icon) -> Self {
        self.icons.insert(category.into(), icon);
        self
    }

    pub fn accepts(&self, feature: &GeoJsonFeature) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(feature))
    }

    /// Renders every accepted feature with a usable geometry
    pub fn render(&self, collection: &FeatureCollection) -> LayerGroup {
        let mut group = LayerGroup::new(
            self.id.clone(),
            self.name.clone(),
            self.styles.clone(),
            self.fly_to,
        );

        for (index, feature) in collection.iter().enumerate() {
            if !self.accepts(feature) {
                continue;
            }
            if let Some(element) = self.render_feature(index, feature) {
                group.push(element);
            }
        }

        log::debug!(
            "rendered {} of {} features into {}",
            group.len(),
            collection.len(),
            self.id
        );
        group
    }

    fn render_feature(&self, index: usize, feature: &GeoJsonFeature) -> Option<RenderedFeature> {
        let Some(geometry) = &feature.geometry else {
            log::warn!("feature #{} has no geometry, skipping", index);
            return None;
        };
        let points = geometry.to_lat_lng_points();

        let (shape, anchor) = match geometry {
            GeoJsonGeometry::Point { .. } => {
                let Some(&position) = points.first() else {
                    log::warn!("feature #{} has an invalid position, skipping", index);
                    return None;
                };
                (self.point_shape(index, feature, position), position)
            }
            GeoJsonGeometry::LineString { .. } => {
                if points.len() < 2 {
                    log::warn!("feature #{} has fewer than two valid positions, skipping", index);
                    return None;
                }
                let line = Polyline::new(points, self.styles.default.clone());
                let anchor = line.bounds().map(|b| b.center()).unwrap_or_default();
                (Shape::Line(line), anchor)
            }
            GeoJsonGeometry::Unsupported => {
                log::warn!("feature #{} has an unsupported geometry type, skipping", index);
                return None;
            }
        };

        let popup = Popup::for_feature(feature.properties(), anchor, &self.popup);
        Some(RenderedFeature::new(index, feature.clone(), shape, popup))
    }

    fn point_shape(
        &self,
        index: usize,
        feature: &GeoJsonFeature,
        position: LatLng,
    ) -> Shape {
        match feature.category().and_then(|c| self.icons.get(c)) {
            Some(icon) => {
                let mut marker = Marker::new(format!("{}/{}", self.id, index), position)
                    .with_icon(icon.clone());
                if let Some(name) = feature.name() {
                    marker = marker.with_title(name);
                }
                Shape::Icon(marker)
            }
            None => Shape::Circle(CircleMarker::new(position, self.styles.default.clone())),
        }
    }
}

/// Renders a collection with the given styles and no filter
pub fn render(collection: &FeatureCollection, styles: StyleConfig) -> LayerGroup {
    FeatureRenderer::new(styles).render(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOPS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Fashion Boutique", "address": "Getreidegasse 12", "type": "clothing"},
         "geometry": {"type": "Point", "coordinates": [13.0438, 47.8005]}},
        {"type": "Feature", "properties": {"name": "Urban Outfitters", "type": "sports"},
         "geometry": {"type": "Point", "coordinates": [13.0476, 47.8121]}},
        {"type": "Feature", "properties": {"address": "Linzer Gasse 3"},
         "geometry": {"type": "Point", "coordinates": [13.0480, 47.8050]}},
        {"type": "Feature", "properties": {"name": "Shopping Walk"},
         "geometry": {"type": "LineString", "coordinates": [[13.04, 47.80], [13.06, 47.81]]}},
        {"type": "Feature", "properties": {"name": "Nowhere"}, "geometry": null},
        {"type": "Feature", "properties": {"name": "Old Town"},
         "geometry": {"type": "Polygon", "coordinates": [[[13.0, 47.0], [13.1, 47.0], [13.0, 47.1]]]}}
    ]}"#;

    fn shops() -> FeatureCollection {
        FeatureCollection::from_str(SHOPS).unwrap()
    }

    #[test]
    fn test_shapes_follow_geometry() {
        let group = render(&shops(), StyleConfig::default());
        let kinds: Vec<&str> = group.elements().iter().map(|e| e.shape().kind()).collect();
        assert_eq!(
            kinds,
            vec!["circleMarker", "circleMarker", "circleMarker", "polyline"]
        );
    }

    #[test]
    fn test_boutique_marker_and_popup() {
        let group = render(&shops(), StyleConfig::default());
        let boutique = group.get(0).unwrap();

        assert_eq!(boutique.anchor(), LatLng::new(47.8005, 13.0438));
        assert_eq!(
            boutique.popup().unwrap().content,
            "Fashion Boutique<br>Getreidegasse 12"
        );
        assert_eq!(boutique.style(), Some(&StyleConfig::default().default));
    }

    #[test]
    fn test_nameless_feature_is_rendered_without_popup() {
        let group = render(&shops(), StyleConfig::default());
        let nameless = group.get(2).unwrap();
        assert_eq!(nameless.source_index(), 2);
        assert!(nameless.popup().is_none());
    }

    #[test]
    fn test_category_filter_excludes_features() {
        let renderer = FeatureRenderer::new(StyleConfig::default())
            .named("clothing", "Clothing Shops")
            .with_filter(category_equals("clothing"));
        let group = renderer.render(&shops());

        assert_eq!(group.len(), 1);
        assert_eq!(group.get(0).unwrap().feature().name(), Some("Fashion Boutique"));
        assert!(group
            .elements()
            .iter()
            .all(|e| e.feature().category() == Some("clothing")));
    }

    #[test]
    fn test_category_icon_makes_icon_marker() {
        let renderer = FeatureRenderer::new(StyleConfig::default())
            .with_category_icon("clothing", Icon::square("css/images/clothshop.png", 30));
        let group = renderer.render(&shops());

        let boutique = group.get(0).unwrap();
        assert_eq!(boutique.shape().kind(), "marker");
        assert!(boutique.style().is_none());
        match boutique.shape() {
            Shape::Icon(marker) => assert_eq!(marker.title(), Some("Fashion Boutique")),
            _ => panic!("expected an icon marker"),
        }
        assert_eq!(group.get(1).unwrap().shape().kind(), "circleMarker");
    }

    #[test]
    fn test_line_popup_anchors_at_center() {
        let renderer = FeatureRenderer::new(StyleConfig::default()).with_popup_options(PopupOptions {
            bold_name: false,
            include_coordinates: true,
        });
        let group = renderer.render(&shops());
        let walk = group.get(3).unwrap();

        assert!(walk.anchor().approx_eq(&LatLng::new(47.805, 13.05), 1e-9));
        assert_eq!(
            walk.popup().unwrap().content,
            "Shopping Walk<br>Coordinates: 47.80500, 13.05000"
        );
    }
}
