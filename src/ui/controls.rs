use crate::ui::{
    layer_control::LayerControl, legend::LegendControl, scale::ScaleControl,
    search::SearchControl,
};
use serde::{Deserialize, Serialize};

/// Corner of the map a control is docked to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Control drawn on top of the map
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Scale(ScaleControl),
    Legend(LegendControl),
    Search(SearchControl),
    Layers(LayerControl),
}

impl Overlay {
    pub fn kind(&self) -> &'static str {
        match self {
            Overlay::Scale(_) => "scale",
            Overlay::Legend(_) => "legend",
            Overlay::Search(_) => "search",
            Overlay::Layers(_) => "layers",
        }
    }
}

/// Holds at most one control of each kind
#[derive(Debug, Clone, Default)]
pub struct ControlManager {
    scale: Option<ScaleControl>,
    legend: Option<LegendControl>,
    search: Option<SearchControl>,
    layers: Option<LayerControl>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control, returning the one of the same kind it replaced
    pub fn add(&mut self, overlay: Overlay) -> Option<Overlay> {
        match overlay {
            Overlay::Scale(c) => self.scale.replace(c).map(Overlay::Scale),
            Overlay::Legend(c) => self.legend.replace(c).map(Overlay::Legend),
            Overlay::Search(c) => self.search.replace(c).map(Overlay::Search),
            Overlay::Layers(c) => self.layers.replace(c).map(Overlay::Layers),
        }
    }

    pub fn scale(&self) -> Option<&ScaleControl> {
        self.scale.as_ref()
    }

    pub fn legend(&self) -> Option<&LegendControl> {
        self.legend.as_ref()
    }

    pub fn search(&self) -> Option<&SearchControl> {
        self.search.as_ref()
    }

    pub fn layers(&self) -> Option<&LayerControl> {
        self.layers.as_ref()
    }

    /// Kinds of the registered controls
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        if self.scale.is_some() {
            kinds.push("scale");
        }
        if self.legend.is_some() {
            kinds.push("legend");
        }
        if self.search.is_some() {
            kinds.push("search");
        }
        if self.layers.is_some() {
            kinds.push("layers");
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.kinds().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
