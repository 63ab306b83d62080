use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub default_language: String,
    pub max_retries: u32,
    pub toast_duration_ms: u32,
    pub geocoding: GeocodingConfig,
    pub map_config: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub nominatim_url: String,
    pub accept_language: String,
    pub search_country_codes: String,
    pub search_limit: u32,
    pub reverse_timeout_ms: u32,
    pub search_timeout_ms: u32,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            accept_language: "es".to_string(),
            search_country_codes: "es,mx,ar,co,pe,cl,ve,ec,bo,py,uy".to_string(),
            search_limit: 5,
            reverse_timeout_ms: 5000,
            search_timeout_ms: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom al enfocar un punto concreto (búsqueda, geolocalización, guardados)
    pub focus_zoom: f64,
    pub marker_start_lat: f64,
    pub marker_start_lng: f64,
    pub leaflet_timeout_ms: u32,
    pub geolocation_timeout_ms: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 10.4806,
            default_center_lng: -66.9036,
            default_zoom: 8.0,
            min_zoom: 2.0,
            max_zoom: 19.0,
            focus_zoom: 15.0,
            marker_start_lat: 40.4168,
            marker_start_lng: -3.7038,
            leaflet_timeout_ms: 10_000,
            geolocation_timeout_ms: 10_000,
        }
    }
}

impl MapConfig {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.default_center_lat, self.default_center_lng)
    }

    /// Posición inicial del marcador (distinta del centro del mapa)
    pub fn marker_start(&self) -> Coordinates {
        Coordinates::new(self.marker_start_lat, self.marker_start_lng)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            default_language: "ES".to_string(),
            max_retries: 3,
            toast_duration_ms: 4000,
            geocoding: GeocodingConfig::default(),
            map_config: MapConfig::default(),
        }
    }
}

/// Parsea un valor opcional de compilación, con valor por defecto si falta o es inválido
fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let geo = defaults.geocoding;
        let map = defaults.map_config;

        Self {
            environment: option_env!("ENVIRONMENT")
                .unwrap_or(defaults.environment.as_str())
                .to_string(),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            default_language: option_env!("DEFAULT_LANGUAGE")
                .unwrap_or(defaults.default_language.as_str())
                .to_uppercase(),
            max_retries: parse_or(option_env!("MAX_RETRIES"), defaults.max_retries),
            toast_duration_ms: parse_or(option_env!("TOAST_DURATION_MS"), defaults.toast_duration_ms),
            geocoding: GeocodingConfig {
                nominatim_url: option_env!("NOMINATIM_URL")
                    .unwrap_or(geo.nominatim_url.as_str())
                    .trim_end_matches('/')
                    .to_string(),
                accept_language: option_env!("ACCEPT_LANGUAGE")
                    .unwrap_or(geo.accept_language.as_str())
                    .to_string(),
                search_country_codes: option_env!("SEARCH_COUNTRY_CODES")
                    .unwrap_or(geo.search_country_codes.as_str())
                    .to_string(),
                search_limit: parse_or(option_env!("SEARCH_LIMIT"), geo.search_limit),
                reverse_timeout_ms: parse_or(option_env!("REVERSE_TIMEOUT_MS"), geo.reverse_timeout_ms),
                search_timeout_ms: parse_or(option_env!("SEARCH_TIMEOUT_MS"), geo.search_timeout_ms),
            },
            map_config: MapConfig {
                default_center_lat: parse_or(option_env!("DEFAULT_MAP_CENTER_LAT"), map.default_center_lat),
                default_center_lng: parse_or(option_env!("DEFAULT_MAP_CENTER_LNG"), map.default_center_lng),
                default_zoom: parse_or(option_env!("DEFAULT_MAP_ZOOM"), map.default_zoom),
                leaflet_timeout_ms: parse_or(option_env!("LEAFLET_TIMEOUT_MS"), map.leaflet_timeout_ms),
                geolocation_timeout_ms: parse_or(
                    option_env!("GEOLOCATION_TIMEOUT_MS"),
                    map.geolocation_timeout_ms,
                ),
                ..map
            },
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_invalid() {
        assert_eq!(parse_or::<u32>(None, 3), 3);
        assert_eq!(parse_or::<u32>(Some("abc"), 3), 3);
        assert_eq!(parse_or::<u32>(Some(" 7 "), 3), 7);
        assert_eq!(parse_or::<f64>(Some("-66.9"), 0.0), -66.9);
        assert!(!parse_or::<bool>(Some("false"), true));
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.map_config.default_zoom, 8.0);
        assert_eq!(config.map_config.focus_zoom, 15.0);
        assert_eq!(config.geocoding.search_limit, 5);
        assert_eq!(config.geocoding.reverse_timeout_ms, 5000);
        assert_eq!(config.geocoding.search_timeout_ms, 8000);
    }

    #[test]
    fn log_level_follows_flag() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Debug);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
