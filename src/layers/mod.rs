pub mod macros;

pub mod animation;
pub mod base;
pub mod group;
pub mod manager;
pub mod marker;
pub mod tile;
pub mod vector;

pub use animation::{EasingType, ViewFrame, ViewTransition};
pub use base::{LayerProperties, LayerTrait, LayerType};
pub use group::{LayerGroup, RenderedFeature, Shape};
pub use manager::LayerManager;
pub use marker::{Icon, Marker};
pub use tile::TileLayer;
pub use vector::{CircleMarker, Polyline};
