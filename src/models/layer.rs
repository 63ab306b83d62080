use serde::{Deserialize, Serialize};

/// Capas base disponibles en el selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapLayer {
    #[default]
    Osm,
    Satellite,
    Topo,
}

// Tiles de reemplazo (SVG 256x256 con texto) cuando un tile no carga
const OSM_ERROR_TILE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjU2IiBoZWlnaHQ9IjI1NiIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjU2IiBoZWlnaHQ9IjI1NiIgZmlsbD0iI2Y0ZjRmNCIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBkb21pbmFudC1iYXNlbGluZT0ibWlkZGxlIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBmb250LWZhbWlseT0ic2Fucy1zZXJpZiIgZm9udC1zaXplPSIxNiIgZmlsbD0iIzk5OTk5OSI+RXJyb3I8L3RleHQ+PC9zdmc+";
const SATELLITE_ERROR_TILE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjU2IiBoZWlnaHQ9IjI1NiIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjU2IiBoZWlnaHQ9IjI1NiIgZmlsbD0iIzM0MzQzNCIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBkb21pbmFudC1iYXNlbGluZT0ibWlkZGxlIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBmb250LWZhbWlseT0ic2Fucy1zZXJpZiIgZm9udC1zaXplPSIxNiIgZmlsbD0iI2NjY2NjYyI+U2F0w6lsaXRlPC90ZXh0Pjwvc3ZnPg==";
const TOPO_ERROR_TILE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjU2IiBoZWlnaHQ9IjI1NiIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjU2IiBoZWlnaHQ9IjI1NiIgZmlsbD0iIzJkNGEyMiIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBkb21pbmFudC1iYXNlbGluZT0ibWlkZGxlIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBmb250LWZhbWlseT0ic2Fucy1zZXJpZiIgZm9udC1zaXplPSIxNiIgZmlsbD0iI2NjY2NjYyI+VG9wbzwvdGV4dD48L3N2Zz4=";

impl MapLayer {
    pub const ALL: [MapLayer; 3] = [MapLayer::Osm, MapLayer::Satellite, MapLayer::Topo];

    pub fn key(&self) -> &'static str {
        match self {
            MapLayer::Osm => "osm",
            MapLayer::Satellite => "satellite",
            MapLayer::Topo => "topo",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "osm" => Some(MapLayer::Osm),
            "satellite" => Some(MapLayer::Satellite),
            "topo" => Some(MapLayer::Topo),
            _ => None,
        }
    }

    pub fn tile_url(&self) -> &'static str {
        match self {
            MapLayer::Osm => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            MapLayer::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
            MapLayer::Topo => "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            MapLayer::Osm => {
                "© <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            MapLayer::Satellite => "© <a href=\"https://www.esri.com/\">Esri</a>",
            MapLayer::Topo => "© <a href=\"https://opentopomap.org\">OpenTopoMap</a>",
        }
    }

    pub fn max_zoom(&self) -> u8 {
        match self {
            MapLayer::Osm | MapLayer::Satellite => 19,
            MapLayer::Topo => 17,
        }
    }

    pub fn error_tile(&self) -> &'static str {
        match self {
            MapLayer::Osm => OSM_ERROR_TILE,
            MapLayer::Satellite => SATELLITE_ERROR_TILE,
            MapLayer::Topo => TOPO_ERROR_TILE,
        }
    }

    /// Clave i18n de la etiqueta
    pub fn label_key(&self) -> &'static str {
        match self {
            MapLayer::Osm => "capa_osm",
            MapLayer::Satellite => "capa_satelite",
            MapLayer::Topo => "capa_topo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_and_unknown_is_none() {
        for layer in MapLayer::ALL {
            assert_eq!(MapLayer::from_key(layer.key()), Some(layer));
        }
        assert_eq!(MapLayer::from_key(" SATELLITE "), Some(MapLayer::Satellite));
        assert_eq!(MapLayer::from_key("hybrid"), None);
        assert_eq!(MapLayer::default(), MapLayer::Osm);
    }

    #[test]
    fn topo_has_lower_max_zoom() {
        assert_eq!(MapLayer::Topo.max_zoom(), 17);
        assert_eq!(MapLayer::Osm.max_zoom(), 19);
    }

    #[test]
    fn serializes_as_lowercase_key() {
        assert_eq!(serde_json::to_string(&MapLayer::Satellite).unwrap(), "\"satellite\"");
    }
}
