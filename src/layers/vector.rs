use crate::{
    core::geo::{LatLng, LatLngBounds},
    rendering::style::StyleDescriptor,
};
use serde::{Deserialize, Serialize};

/// A circle of fixed pixel radius centered on a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleMarker {
    pub center: LatLng,
    pub style: StyleDescriptor,
}

impl CircleMarker {
    pub fn new(center: LatLng, style: StyleDescriptor) -> Self {
        Self { center, style }
    }

    pub fn set_style(&mut self, style: StyleDescriptor) {
        self.style = style;
    }

    pub fn radius(&self) -> f64 {
        self.style.radius
    }
}

/// An open path through a sequence of coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<LatLng>,
    pub style: StyleDescriptor,
}

impl Polyline {
    pub fn new(points: Vec<LatLng>, style: StyleDescriptor) -> Self {
        Self { points, style }
    }

    pub fn set_style(&mut self, style: StyleDescriptor) {
        self.style = style;
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        let (first, rest) = self.points.split_first()?;
        let mut bounds = LatLngBounds::from_point(*first);
        for point in rest {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Total length along the path in meters
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}
