use poimap::{
    core::{config::FallbackConfig, geo::LatLng},
    data::{loader::load_features, source::InlineSource},
    layers::marker::Icon,
    Map, FeatureEvent, FeatureRenderer, StyleConfig,
};

const SHOPS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature",
     "properties": {"name": "Fashion Boutique", "address": "Getreidegasse 12", "type": "clothing"},
     "geometry": {"type": "Point", "coordinates": [13.0438, 47.8005]}},
    {"type": "Feature",
     "properties": {"name": "Urban Outfitters", "address": "Linzer Gasse 3", "type": "sports"},
     "geometry": {"type": "Point", "coordinates": [13.0476, 47.8121]}}
  ]
}"#;

/// Example of using poimap in headless mode with an inline data source
#[tokio::main]
async fn main() -> poimap::Result<()> {
    env_logger::init();
    println!("🗺️ poimap Headless Example");
    println!("==========================");

    let center = LatLng::new(47.8095, 13.0550);
    let mut map = Map::initialize(center, 14.0)?;
    map.add_base_layer(
        "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        "© OpenStreetMap contributors",
    )?;
    println!("✅ Map created at {:.4}, {:.4}", center.lat, center.lng);

    // sports shops get an icon, everything else a circle
    let renderer = FeatureRenderer::new(StyleConfig::default())
        .named("shops", "Shops")
        .with_category_icon("sports", Icon::square("css/images/sportshop.png", 30));
    let source = InlineSource::new("inline shops", SHOPS);
    let outcome = load_features(&mut map, &source, &renderer, &FallbackConfig::default()).await?;
    println!("✅ Loaded: {:?}", outcome);

    if let Some(group) = map.group("shops") {
        for element in group.elements() {
            println!(
                "   📍 {} as {}",
                element.feature().name().unwrap_or("?"),
                element.shape().kind()
            );
        }
    }

    let effects = map.dispatch_feature_event("shops", 0, FeatureEvent::HoverStart)?;
    println!("\n🖱️ Hover effects: {:?}", effects);

    map.dispatch_feature_event("shops", 0, FeatureEvent::Click)?;
    println!(
        "🚀 Flew to {:.4}, {:.4} at zoom {}",
        map.center().lat,
        map.center().lng,
        map.zoom()
    );

    for event in map.process_events() {
        println!("   event: {:?}", event);
    }
    Ok(())
}
