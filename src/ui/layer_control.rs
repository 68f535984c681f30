use crate::{ui::controls::ControlPosition, MapError, Result};
use serde::{Deserialize, Serialize};

/// A labelled entry of the layer switcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub label: String,
    pub layer_id: String,
}

/// Layer switcher: base layers are exclusive (radio buttons), overlays are
/// toggled independently (checkboxes)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerControl {
    pub position: ControlPosition,
    pub base_layers: Vec<LayerEntry>,
    pub overlays: Vec<LayerEntry>,
}

impl LayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_layer(mut self, label: impl Into<String>, layer_id: impl Into<String>) -> Self {
        self.base_layers.push(LayerEntry {
            label: label.into(),
            layer_id: layer_id.into(),
        });
        self
    }

    pub fn with_overlay(mut self, label: impl Into<String>, layer_id: impl Into<String>) -> Self {
        self.overlays.push(LayerEntry {
            label: label.into(),
            layer_id: layer_id.into(),
        });
        self
    }

    pub fn base_layer_id(&self, label: &str) -> Result<&str> {
        find(&self.base_layers, label)
    }

    pub fn overlay_id(&self, label: &str) -> Result<&str> {
        find(&self.overlays, label)
    }

    pub fn base_layer_ids(&self) -> impl Iterator<Item = &str> {
        self.base_layers.iter().map(|entry| entry.layer_id.as_str())
    }
}

fn find<'a>(entries: &'a [LayerEntry], label: &str) -> Result<&'a str> {
    entries
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| entry.layer_id.as_str())
        .ok_or_else(|| MapError::UnknownLayer(label.to_string()))
}
