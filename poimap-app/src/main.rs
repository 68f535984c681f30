//! Builds the Salzburg clothing shop map, loads its features and walks
//! through the interactions a visitor would trigger.
//!
//! ```text
//! poimap-app [config.json] [data source]
//! RUST_LOG=debug poimap-app settings.json https://example.org/shops.geojson
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use poimap::{
    core::builder::MapBuilder,
    data::{loader::load_features, source::source_for},
    layers::{group::Shape, marker::Icon},
    prelude::HashMap,
    ui::{layer_control::LayerControl, search::SearchControl},
    category_equals, FeatureEvent, FeatureRenderer, LayerTrait, LoadOutcome, Map,
    MapConfig, MapEvent, MapInput, Overlay, TileCoord,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "poimap-app")]
#[command(about = "Point-of-interest map walkthrough")]
struct Cli {
    /// JSON settings file; built-in Salzburg defaults when omitted
    config: Option<PathBuf>,

    /// GeoJSON path or http(s) URL, overriding the configured source
    source: Option<String>,

    /// Search the features for this text and fly to the first hit
    #[arg(long)]
    search: Option<String>,
}

/// Settings of the application on top of the map configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct AppConfig {
    #[serde(flatten)]
    map: MapConfig,
    /// Label of the feature overlay in the layer switcher
    overlay_label: Option<String>,
    /// Only show features of this `type`
    category: Option<String>,
    /// Icon per feature `type`; other points are drawn as circles
    category_icons: HashMap<String, Icon>,
}

impl AppConfig {
    fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.map.validate()?;
        Ok(config)
    }

    fn renderer(&self) -> FeatureRenderer {
        let mut renderer = FeatureRenderer::from_config(&self.map).named("shops", self.overlay_label());
        if let Some(category) = &self.category {
            renderer = renderer.with_filter(category_equals(category.clone()));
        }
        for (category, icon) in &self.category_icons {
            renderer = renderer.with_category_icon(category.clone(), icon.clone());
        }
        renderer
    }

    fn overlay_label(&self) -> String {
        self.overlay_label
            .clone()
            .unwrap_or_else(|| "Clothing Shops".to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(source) = cli.source {
        config.map.data_source = source;
    }

    let mut map = MapBuilder::shop_demo(&config.map)
        .build()
        .context("failed to build the map")?;
    map.on("coordinates", |event| log::info!("{:?}", event));

    let source = source_for(&config.map.data_source);
    let renderer = config.renderer();
    let outcome = load_features(&mut map, source.as_ref(), &renderer, &config.map.fallback).await?;

    if let LoadOutcome::Rendered { layer_id, .. } = &outcome {
        register_overlay(&mut map, &config.overlay_label(), layer_id)?;
        map.add_overlay(Overlay::Search(SearchControl::new(layer_id.clone())))?;
    }

    print_summary(&map, &outcome);

    if let LoadOutcome::Rendered { layer_id, .. } = &outcome {
        walkthrough(&mut map, layer_id)?;
        if let Some(query) = &cli.search {
            match map.search_and_fly(query)? {
                Some(hit) => println!(
                    "search {:?}: {} -> center {:.5}, {:.5} zoom {}",
                    query,
                    hit.label,
                    map.center().lat,
                    map.center().lng,
                    map.zoom()
                ),
                None => println!("search {:?}: no match", query),
            }
        }
    }

    map.handle_input(MapInput::DoubleClick { at: map.center() })?;
    for event in map.process_events() {
        log::debug!("event {}", event.kind());
        if let MapEvent::CoordinatesReported { text } = &event {
            println!("double click: {}", text);
        }
    }
    Ok(())
}

/// Lists the feature group in the layer switcher next to the base layers
fn register_overlay(map: &mut Map, label: &str, layer_id: &str) -> Result<()> {
    let control = map
        .controls()
        .layers()
        .cloned()
        .unwrap_or_else(LayerControl::new)
        .with_overlay(label, layer_id);
    map.add_overlay(Overlay::Layers(control))?;
    Ok(())
}

fn print_summary(map: &Map, outcome: &LoadOutcome) {
    let center = map.center();
    println!(
        "map centered at {:.4}, {:.4}, zoom {}",
        center.lat,
        center.lng,
        map.zoom()
    );
    if let Some(base) = map.active_base_layer() {
        println!("base layer: {} ({})", base.name(), base.attribution());
    }
    if let Some(url) = map.tile_url(TileCoord::from_lat_lng(&center, map.zoom() as u8)) {
        println!("center tile: {}", url);
    }
    if let Some(scale) = map.scale_reading() {
        println!("scale: {} ({} px)", scale.label, scale.width_px);
    }
    if let Some(legend) = map.controls().legend() {
        println!("legend: {}", legend.to_html());
    }

    match outcome {
        LoadOutcome::Rendered { layer_id, elements } => {
            println!("{} features in {}", elements, layer_id);
            if let Some(group) = map.group(layer_id) {
                for element in group.elements() {
                    let anchor = element.anchor();
                    println!(
                        "  {:<12} {:.4}, {:.4}  {}",
                        element.shape().kind(),
                        anchor.lat,
                        anchor.lng,
                        element
                            .popup()
                            .map(|p| p.content.as_str())
                            .unwrap_or("(no popup)")
                    );
                }
            }
        }
        LoadOutcome::Fallback { error, .. } => {
            println!("no features loaded ({}), showing the fallback marker", error);
        }
    }
}

/// Hover over, leave and click the first feature, printing what changes
fn walkthrough(map: &mut Map, layer_id: &str) -> Result<()> {
    let Some(first) = map.group(layer_id).and_then(|group| group.get(0)) else {
        return Ok(());
    };
    let name = first.feature().name().unwrap_or("(unnamed)").to_string();

    map.dispatch_feature_event(layer_id, 0, FeatureEvent::HoverStart)?;
    println!("hover {}: {}", name, describe_element(map, layer_id));

    map.dispatch_feature_event(layer_id, 0, FeatureEvent::HoverEnd)?;
    println!("leave {}: {}", name, describe_element(map, layer_id));

    map.dispatch_feature_event(layer_id, 0, FeatureEvent::Click)?;
    println!(
        "click {}: center {:.5}, {:.5} zoom {}",
        name,
        map.center().lat,
        map.center().lng,
        map.zoom()
    );
    Ok(())
}

fn describe_element(map: &Map, layer_id: &str) -> String {
    let Some(element) = map.group(layer_id).and_then(|group| group.get(0)) else {
        return String::new();
    };
    let popup = if element.popup().is_some_and(|p| p.open) {
        "popup open"
    } else {
        "popup closed"
    };
    match (element.shape(), element.style()) {
        (Shape::Icon(_), _) | (_, None) => popup.to_string(),
        (_, Some(style)) => format!("fill {} radius {}, {}", style.fill_color, style.radius, popup),
    }
}
