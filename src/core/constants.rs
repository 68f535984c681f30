//! Map-wide defaults for the Salzburg shop map.
//! Keeping them in a single place makes it easier to tweak the demo's magic numbers.

/// Salzburg city center, `(lat, lng)`.
pub const DEFAULT_CENTER: (f64, f64) = (47.8095, 13.0550);

/// Initial zoom level of the demo map.
pub const DEFAULT_ZOOM: f64 = 14.0;

/// Zoom level used when flying to a clicked or searched feature.
pub const FLY_TO_ZOOM: f64 = 16.0;

/// Duration of the fly-to animation in seconds.
pub const FLY_TO_DURATION_SECS: f64 = 1.5;

/// Zoom limits applied to every viewport.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Viewport size used by [`crate::core::map::Map::initialize`].
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (1024.0, 768.0);

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// OpenStreetMap tile server template.
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the OpenStreetMap tile usage policy.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// OpenTopoMap tile server template, offered as an alternative base map.
pub const OPENTOPOMAP_TILE_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";

pub const OPENTOPOMAP_ATTRIBUTION: &str = "© OpenTopoMap contributors";

/// Relative path of the shop data shipped with the repository.
pub const DEFAULT_DATA_PATH: &str = "data/clothshops.geojson";

/// Popup of the marker shown when the shop data cannot be loaded.
pub const FALLBACK_POPUP: &str = "<b>Test Marker</b><br>Salzburg Center";

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);
