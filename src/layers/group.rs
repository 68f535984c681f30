use crate::{
    core::{
        config::FlyToConfig,
        geo::{LatLng, LatLngBounds},
    },
    data::geojson::GeoJsonFeature,
    input::{
        events::{Effect, FeatureEvent},
        handler::{handle_feature_event, InteractionContext, InteractionState},
    },
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        marker::Marker,
        vector::{CircleMarker, Polyline},
    },
    rendering::style::{StyleConfig, StyleDescriptor},
    ui::popup::Popup,
    MapError, Result,
};

/// The visual element chosen for a feature
pub enum Shape {
    Circle(CircleMarker),
    Icon(Marker),
    Line(Polyline),
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "circleMarker",
            Shape::Icon(_) => "marker",
            Shape::Line(_) => "polyline",
        }
    }
}

/// One feature turned into a visual element. Owns its style and popup state.
pub struct RenderedFeature {
    source_index: usize,
    feature: GeoJsonFeature,
    shape: Shape,
    state: InteractionState,
    popup: Option<Popup>,
}

impl RenderedFeature {
    pub fn new(
        source_index: usize,
        feature: GeoJsonFeature,
        shape: Shape,
        popup: Option<Popup>,
    ) -> Self {
        Self {
            source_index,
            feature,
            shape,
            state: InteractionState::default(),
            popup,
        }
    }

    /// Position of the feature in the collection it was rendered from
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn feature(&self) -> &GeoJsonFeature {
        &self.feature
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Current style; icon markers are not styled
    pub fn style(&self) -> Option<&StyleDescriptor> {
        match &self.shape {
            Shape::Circle(circle) => Some(&circle.style),
            Shape::Line(line) => Some(&line.style),
            Shape::Icon(_) => None,
        }
    }

    /// Where the element sits on the map: the point itself, or the middle of
    /// a line's bounding box
    pub fn anchor(&self) -> LatLng {
        match &self.shape {
            Shape::Circle(circle) => circle.center,
            Shape::Icon(marker) => marker.position(),
            Shape::Line(line) => line.bounds().map(|b| b.center()).unwrap_or_default(),
        }
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        match &self.shape {
            Shape::Line(line) => line.bounds(),
            _ => Some(LatLngBounds::from_point(self.anchor())),
        }
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SetStyle(style) => match &mut self.shape {
                Shape::Circle(circle) => circle.set_style(style.clone()),
                Shape::Line(line) => line.set_style(style.clone()),
                Shape::Icon(_) => {}
            },
            Effect::OpenPopup => {
                if let Some(popup) = &mut self.popup {
                    popup.show();
                }
            }
            Effect::ClosePopup => {
                if let Some(popup) = &mut self.popup {
                    popup.hide();
                }
            }
            Effect::BringToFront | Effect::FlyTo { .. } => {}
        }
    }
}

/// A layer made of rendered features, e.g. all clothing shops
pub struct LayerGroup {
    properties: LayerProperties,
    elements: Vec<RenderedFeature>,
    /// Element indices from back to front
    draw_order: Vec<usize>,
    styles: StyleConfig,
    fly_to: FlyToConfig,
}

impl LayerGroup {
    pub fn new(id: String, name: String, styles: StyleConfig, fly_to: FlyToConfig) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Group),
            elements: Vec::new(),
            draw_order: Vec::new(),
            styles,
            fly_to,
        }
    }

    pub fn push(&mut self, element: RenderedFeature) {
        self.draw_order.push(self.elements.len());
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[RenderedFeature] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&RenderedFeature> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn styles(&self) -> &StyleConfig {
        &self.styles
    }

    /// Elements in paint order, last one on top
    pub fn draw_order(&self) -> impl Iterator<Item = &RenderedFeature> {
        self.draw_order.iter().map(|&i| &self.elements[i])
    }

    /// Runs one pointer event through the element's state machine.
    ///
    /// Element-local effects are applied here; all effects are returned so
    /// the map can act on `FlyTo` and report popup changes.
    pub fn handle_event(&mut self, index: usize, event: FeatureEvent) -> Result<Vec<Effect>> {
        let element = self.elements.get_mut(index).ok_or_else(|| {
            MapError::Layer(format!("{} has no element {}", self.properties.id, index))
        })?;

        let ctx = InteractionContext {
            styles: &self.styles,
            has_popup: element.popup.is_some(),
            styleable: !matches!(element.shape, Shape::Icon(_)),
            anchor: element.anchor(),
            fly_zoom: self.fly_to.zoom,
            fly_duration: self.fly_to.duration(),
            fly_easing: self.fly_to.easing,
        };
        let transition = handle_feature_event(element.state, event, &ctx);

        element.state = transition.state;
        for effect in &transition.effects {
            element.apply(effect);
        }

        if transition.effects.contains(&Effect::BringToFront) {
            self.draw_order.retain(|&i| i != index);
            self.draw_order.push(index);
        }

        Ok(transition.effects)
    }
}

impl LayerTrait for LayerGroup {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "elements": self.elements.len(),
            "style": self.styles.default,
            "highlightStyle": self.styles.highlight
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.elements
            .iter()
            .filter_map(RenderedFeature::bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}
