#![cfg(feature = "tokio-runtime")]

use poimap::{
    core::{builder::MapBuilder, config::MapConfig},
    data::{loader::load_features, source::FileSource},
    prelude::*,
};

fn bundled_shops() -> FileSource {
    FileSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/clothshops.geojson"))
}

async fn demo_map() -> (Map, String) {
    let config = MapConfig::default();
    let mut map = MapBuilder::shop_demo(&config).build().unwrap();
    let renderer = FeatureRenderer::from_config(&config).named("shops", "Clothing Shops");

    let outcome = load_features(&mut map, &bundled_shops(), &renderer, &config.fallback)
        .await
        .unwrap();
    let LoadOutcome::Rendered { layer_id, .. } = outcome else {
        panic!("bundled data should load");
    };

    let switcher = map
        .controls()
        .layers()
        .cloned()
        .unwrap()
        .with_overlay("Clothing Shops", &layer_id);
    map.add_overlay(Overlay::Layers(switcher)).unwrap();
    map.add_overlay(Overlay::Search(SearchControl::new(&layer_id)))
        .unwrap();
    map.process_events();
    (map, layer_id)
}

#[tokio::test]
async fn test_demo_controls() {
    println!("🧪 [TEST] Demo map controls");
    let (map, _) = demo_map().await;

    assert_eq!(map.controls().kinds(), vec!["scale", "legend", "search", "layers"]);
    assert_eq!(map.scale_reading().unwrap().label, "500 m");
    assert!(map
        .controls()
        .legend()
        .unwrap()
        .to_html()
        .contains("Highlighted Shop"));
}

#[tokio::test]
async fn test_search_flies_to_shop() {
    let (mut map, _) = demo_map().await;

    let hit = map.search_and_fly("style").unwrap().unwrap();
    assert_eq!(hit.label, "Style Store");
    assert_eq!(map.center(), LatLng::new(47.8102, 13.0602));
    assert_eq!(map.zoom(), 16.0);

    let transition = map.last_transition().unwrap();
    assert_eq!(transition.from_zoom, 14.0);
    assert_eq!(transition.sample(Duration::from_secs(2)).center, map.center());
}

#[tokio::test]
async fn test_overlay_toggle_and_base_switch() {
    let (mut map, shops) = demo_map().await;

    map.set_overlay_visible("Clothing Shops", false).unwrap();
    map.select_base_layer("Open Topo Map").unwrap();
    assert!(!map.get_layer(&shops).unwrap().is_visible());
    assert_eq!(map.active_base_layer().unwrap().name(), "Open Topo Map");

    let kinds: Vec<&str> = map.process_events().iter().map(MapEvent::kind).collect();
    assert_eq!(kinds, vec!["overlayremove", "baselayerchange"]);

    assert!(matches!(
        map.set_overlay_visible("Sports Shops", true),
        Err(MapError::UnknownLayer(_))
    ));
}

#[tokio::test]
async fn test_double_click_reports_coordinates() {
    let (mut map, _) = demo_map().await;
    map.handle_input(MapInput::DoubleClick {
        at: LatLng::new(47.80051, 13.04383),
    })
    .unwrap();

    assert_eq!(
        map.process_events(),
        vec![MapEvent::CoordinatesReported {
            text: "Coordinates: 47.80051, 13.04383".to_string()
        }]
    );
}
