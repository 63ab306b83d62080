/// Leaflet 1.9.4 desde unpkg
pub const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_CSS_INTEGRITY: &str = "sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=";
pub const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
pub const LEAFLET_JS_INTEGRITY: &str = "sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=";

/// Pausa tras cargar el script antes de dar `L` por disponible
pub const LEAFLET_SETTLE_MS: u32 = 100;

/// Tile usado para comprobar conectividad
pub const CONNECTIVITY_PROBE_URL: &str = "https://tile.openstreetmap.org/0/0/0.png";

/// Clave del array de ubicaciones guardadas en localStorage
pub const SAVED_LOCATIONS_KEY: &str = "savedLocations";

// Preferencias
pub const PREF_LANGUAGE_KEY: &str = "language";
pub const PREF_MAP_LAYER_KEY: &str = "map_layer";

/// Clave temporal de la prueba de almacenamiento del diagnóstico
pub const STORAGE_TEST_KEY: &str = "map-diagnostic-test";
pub const STORAGE_TEST_VALUE: &str = "test-data";

/// ID del contenedor del mapa (persistente entre renders)
pub const MAP_CONTAINER_ID: &str = "map";

/// Pausa entre pruebas del diagnóstico
pub const DIAGNOSTIC_PAUSE_MS: u32 = 500;
pub const DIAGNOSTIC_PROBE_TIMEOUT_MS: u32 = 5000;

/// Hash de la vista de diagnóstico
pub const DIAGNOSTICS_ROUTE_HASH: &str = "#/diagnostico";
