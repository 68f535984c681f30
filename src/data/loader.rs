//! Fetch, render and add feature layers, falling back to a single marker
//! when the data cannot be loaded.

use crate::{
    core::{config::FallbackConfig, map::Map},
    data::{geojson::FeatureCollection, source::DataSource},
    layers::marker::Marker,
    rendering::renderer::FeatureRenderer,
    Result,
};
use futures::future::join_all;

/// Id of the marker added when loading fails
pub const FALLBACK_MARKER_ID: &str = "fallback";

/// What ended up on the map after a load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The features were rendered into a layer group
    Rendered { layer_id: String, elements: usize },
    /// Loading failed and the fallback marker was added instead
    Fallback { marker_id: String, error: String },
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }
}

/// Fetches and parses a source. Nothing is rendered yet, so the map stays
/// free for other use while this runs.
pub async fn fetch_features(source: &dyn DataSource) -> Result<FeatureCollection> {
    log::debug!("loading features from {}", source.describe());
    source.load().await
}

/// Puts the result of a fetch on the map: the rendered group on success,
/// the fallback marker (popup open) on failure
pub fn apply_load(
    map: &mut Map,
    fetched: Result<FeatureCollection>,
    renderer: &FeatureRenderer,
    fallback: &FallbackConfig,
) -> Result<LoadOutcome> {
    match fetched {
        Ok(collection) => {
            let group = renderer.render(&collection);
            let elements = group.len();
            let layer_id = map.add_group(group)?;
            log::info!("added {} features as {}", elements, layer_id);
            Ok(LoadOutcome::Rendered { layer_id, elements })
        }
        Err(err) => {
            log::error!("Error loading GeoJSON: {}", err);
            let mut marker = Marker::new(FALLBACK_MARKER_ID.to_string(), fallback.location)
                .with_popup(fallback.popup.clone());
            marker.open_popup();
            map.add_layer(Box::new(marker))?;
            Ok(LoadOutcome::Fallback {
                marker_id: FALLBACK_MARKER_ID.to_string(),
                error: err.to_string(),
            })
        }
    }
}

/// Loads one source onto the map
pub async fn load_features(
    map: &mut Map,
    source: &dyn DataSource,
    renderer: &FeatureRenderer,
    fallback: &FallbackConfig,
) -> Result<LoadOutcome> {
    let fetched = fetch_features(source).await;
    apply_load(map, fetched, renderer, fallback)
}

/// Fetches several sources concurrently, then adds them in the given order.
/// Every failure maps to the same fallback marker, so at most one is shown.
pub async fn load_all(
    map: &mut Map,
    jobs: &[(&dyn DataSource, FeatureRenderer)],
    fallback: &FallbackConfig,
) -> Result<Vec<LoadOutcome>> {
    let fetched = join_all(jobs.iter().map(|(source, _)| fetch_features(*source))).await;

    jobs.iter()
        .zip(fetched)
        .map(|((_, renderer), result)| apply_load(map, result, renderer, fallback))
        .collect()
}
