use crate::{
    core::{config::FlyToConfig, geo::LatLng},
    layers::group::LayerGroup,
    ui::controls::ControlPosition,
};
use serde::{Deserialize, Serialize};

/// Finds features of one layer group by a text property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchControl {
    /// Group searched by the control
    pub layer_id: String,
    pub property_name: String,
    pub position: ControlPosition,
    pub fly_to: FlyToConfig,
}

impl Default for SearchControl {
    fn default() -> Self {
        Self {
            layer_id: "features".to_string(),
            property_name: "name".to_string(),
            position: ControlPosition::TopLeft,
            fly_to: FlyToConfig::default(),
        }
    }
}

/// One matching element
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub layer_id: String,
    /// Element index within the group
    pub index: usize,
    pub label: String,
    pub location: LatLng,
}

impl SearchControl {
    pub fn new(layer_id: impl Into<String>) -> Self {
        Self {
            layer_id: layer_id.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = property_name.into();
        self
    }

    /// Case-insensitive substring match on the configured property, in
    /// element order. A blank query matches nothing.
    pub fn search(&self, group: &LayerGroup, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        group
            .elements()
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                let value = element.feature().properties().get(&self.property_name)?;
                value.to_lowercase().contains(&needle).then(|| SearchHit {
                    layer_id: self.layer_id.clone(),
                    index,
                    label: value,
                    location: element.anchor(),
                })
            })
            .collect()
    }
}
