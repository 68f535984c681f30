use crate::{
    core::{constants::MAX_ZOOM, geo::TileCoord},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    MapError, Result,
};

const DEFAULT_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Base map backed by an XYZ tile server.
///
/// Tiles are fetched and drawn by the front end; the layer only knows how to
/// address them and what attribution they require.
pub struct TileLayer {
    properties: LayerProperties,
    url_template: String,
    attribution: String,
    subdomains: Vec<String>,
    max_zoom: u8,
}

impl TileLayer {
    /// Creates a tile layer, checking that the template addresses tiles by
    /// `{z}`, `{x}` and `{y}`
    pub fn new(
        id: String,
        name: String,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Result<Self> {
        let url_template = url_template.into();
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !url_template.contains(placeholder) {
                return Err(MapError::InvalidTileTemplate(format!(
                    "{url_template} is missing {placeholder}"
                )));
            }
        }

        Ok(Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            url_template,
            attribution: attribution.into(),
            subdomains: DEFAULT_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            max_zoom: MAX_ZOOM as u8,
        })
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// Build the URL of one tile, spreading requests over the subdomains
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x as u64 + coord.y as u64) % self.subdomains.len() as u64) as usize;
            self.subdomains[idx].as_str()
        };

        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url": self.url_template,
            "attribution": self.attribution,
            "subdomains": self.subdomains,
            "maxZoom": self.max_zoom
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{
        OPENTOPOMAP_ATTRIBUTION, OPENTOPOMAP_TILE_URL, OSM_ATTRIBUTION, OSM_TILE_URL,
    };

    #[test]
    fn test_osm_tile_url() {
        let layer = TileLayer::new(
            "osm".to_string(),
            "Open Street Map".to_string(),
            OSM_TILE_URL,
            OSM_ATTRIBUTION,
        )
        .unwrap();
        let url = layer.tile_url(TileCoord::new(8786, 5708, 14));
        // (8786 + 5708) % 3 == 1
        assert_eq!(url, "https://b.tile.openstreetmap.org/14/8786/5708.png");
        assert_eq!(layer.attribution(), "© OpenStreetMap contributors");
    }

    #[test]
    fn test_template_without_subdomain() {
        let layer = TileLayer::new(
            "osm".to_string(),
            "OSM".to_string(),
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors",
        )
        .unwrap();
        assert_eq!(
            layer.tile_url(TileCoord::new(1, 2, 3)),
            "https://tile.openstreetmap.org/3/1/2.png"
        );
    }

    #[test]
    fn test_rejects_template_without_placeholders() {
        let result = TileLayer::new(
            "bad".to_string(),
            "Bad".to_string(),
            "https://tile.example.org/{z}/{x}.png",
            "",
        );
        assert!(matches!(result, Err(MapError::InvalidTileTemplate(_))));
    }

    #[test]
    fn test_options_expose_attribution() {
        let layer = TileLayer::new(
            "topo".to_string(),
            "Topo".to_string(),
            OPENTOPOMAP_TILE_URL,
            OPENTOPOMAP_ATTRIBUTION,
        )
        .unwrap();
        assert_eq!(layer.options()["attribution"], "© OpenTopoMap contributors");
        assert_eq!(layer.layer_type(), LayerType::Tile);
    }
}
