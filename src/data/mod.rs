pub mod geojson;
pub mod loader;
pub mod source;

pub use geojson::{FeatureCollection, FeatureProperties, GeoJsonFeature, GeoJsonGeometry};
pub use loader::{load_all, load_features, LoadOutcome};
pub use source::{DataSource, HttpSource, InlineSource};

#[cfg(feature = "tokio-runtime")]
pub use source::{source_for, FileSource};
