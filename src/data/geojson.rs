use crate::{
    core::geo::{LatLng, LatLngBounds},
    prelude::HashMap,
    MapError, Result,
};
use geo::BoundingRect;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static EMPTY_PROPERTIES: Lazy<FeatureProperties> = Lazy::new(FeatureProperties::default);

/// Geometry of a feature. Only points and lines are rendered; every other
/// GeoJSON geometry type deserializes as `Unsupported`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    #[serde(other)]
    Unsupported,
}

impl GeoJsonGeometry {
    /// Converts coordinates to LatLng points, dropping malformed positions
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                position_to_lat_lng(coordinates).into_iter().collect()
            }
            GeoJsonGeometry::LineString { coordinates } => coordinates
                .iter()
                .filter_map(|c| position_to_lat_lng(c))
                .collect(),
            GeoJsonGeometry::Unsupported => Vec::new(),
        }
    }

    /// Converts into a `geo` geometry, or `None` when no valid position remains
    pub fn to_geo(&self) -> Option<geo_types::Geometry<f64>> {
        let points = self.to_lat_lng_points();
        match self {
            GeoJsonGeometry::Point { .. } => points
                .first()
                .map(|p| geo_types::Point::from(geo_types::Coord::from(*p)).into()),
            GeoJsonGeometry::LineString { .. } if !points.is_empty() => Some(
                geo_types::LineString::from(
                    points
                        .into_iter()
                        .map(geo_types::Coord::from)
                        .collect::<Vec<_>>(),
                )
                .into(),
            ),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.to_geo()?.bounding_rect().map(LatLngBounds::from)
    }
}

/// A GeoJSON position is `[lng, lat, (alt)]`
fn position_to_lat_lng(position: &[f64]) -> Option<LatLng> {
    match position {
        [lng, lat, ..] => {
            let point = LatLng::new(*lat, *lng);
            point.is_valid().then_some(point)
        }
        _ => None,
    }
}

/// The property bag of a shop feature.
///
/// Known keys are lifted into typed fields. String and number values are
/// accepted for them; anything else is treated as absent. Unknown keys are
/// kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Map<String, Value>", into = "serde_json::Map<String, Value>")]
pub struct FeatureProperties {
    pub name: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
    /// The `type` property, used to split shops into categories
    pub category: Option<String>,
    pub extra: HashMap<String, Value>,
}

impl FeatureProperties {
    /// Looks up a property by its GeoJSON key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "name" => self.name.clone(),
            "address" => self.address.clone(),
            "hours" => self.hours.clone(),
            "type" => self.category.clone(),
            other => self.extra.get(other).and_then(value_as_text),
        }
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<serde_json::Map<String, Value>> for FeatureProperties {
    fn from(mut map: serde_json::Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).as_ref().and_then(value_as_text);
        let name = take("name");
        let address = take("address");
        let hours = take("hours");
        let category = take("type");
        Self {
            name,
            address,
            hours,
            category,
            extra: map.into_iter().collect(),
        }
    }
}

impl From<FeatureProperties> for serde_json::Map<String, Value> {
    fn from(properties: FeatureProperties) -> Self {
        let mut map: serde_json::Map<String, Value> = properties.extra.into_iter().collect();
        let known = [
            ("name", properties.name),
            ("address", properties.address),
            ("hours", properties.hours),
            ("type", properties.category),
        ];
        for (key, value) in known {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value));
            }
        }
        map
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<FeatureProperties>,
}

impl GeoJsonFeature {
    pub fn new(geometry: GeoJsonGeometry, properties: FeatureProperties) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }

    /// Point feature at `[lng, lat]`
    pub fn point(position: [f64; 2], properties: FeatureProperties) -> Self {
        Self::new(
            GeoJsonGeometry::Point {
                coordinates: position.to_vec(),
            },
            properties,
        )
    }

    /// Properties of the feature; `null` or missing properties read as empty
    pub fn properties(&self) -> &FeatureProperties {
        self.properties.as_ref().unwrap_or(&EMPTY_PROPERTIES)
    }

    pub fn name(&self) -> Option<&str> {
        self.properties().name.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.properties().category.as_deref()
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.geometry.as_ref()?.bounds()
    }
}

/// An ordered collection of features, as loaded from one resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<GeoJsonFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoJsonFeature>) -> Self {
        Self { features }
    }

    /// Parses a GeoJSON document that must be a `FeatureCollection`.
    ///
    /// Individual features that fail to deserialize are skipped with a
    /// warning; only a malformed document as a whole is an error.
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawDocument {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            features: Vec<Value>,
        }

        let raw: RawDocument = serde_json::from_str(geojson_str)
            .map_err(|e| MapError::ParseError(format!("Invalid GeoJSON: {}", e)))?;
        if raw.kind != "FeatureCollection" {
            return Err(MapError::ParseError(format!(
                "expected a FeatureCollection, found {}",
                raw.kind
            )));
        }

        let mut features = Vec::with_capacity(raw.features.len());
        for (index, value) in raw.features.into_iter().enumerate() {
            match serde_json::from_value::<GeoJsonFeature>(value) {
                Ok(feature) => features.push(feature),
                Err(e) => log::warn!("skipping malformed feature #{}: {}", index, e),
            }
        }
        log::debug!("parsed {} features", features.len());

        Ok(Self { features })
    }

    pub fn features(&self) -> &[GeoJsonFeature] {
        &self.features
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoJsonFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Gets the bounding box of all features with a usable geometry
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.features
            .iter()
            .filter_map(GeoJsonFeature::bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}
