// ============================================================================
// GEOCODING SERVICE - SOLO COMUNICACIÓN HTTP CON NOMINATIM (Stateless)
// ============================================================================

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::Deserialize;
use web_sys::AbortController;

use crate::config::{GeocodingConfig, CONFIG};
use crate::models::{Coordinates, SearchResult};
use crate::utils::DIAGNOSTIC_PROBE_TIMEOUT_MS;

/// Error de una llamada a Nominatim
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodingError {
    /// La petición se abortó por tiempo de espera
    Timeout,
    Http(u16),
    Network(String),
    Parse(String),
}

impl GeocodingError {
    /// Clave i18n del mensaje para el usuario
    pub fn user_message_key(&self) -> &'static str {
        match self {
            GeocodingError::Timeout => "busqueda_timeout",
            GeocodingError::Http(_) => "busqueda_servidor",
            _ => "busqueda_generico",
        }
    }
}

impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodingError::Timeout => write!(f, "Timeout"),
            GeocodingError::Http(status) => write!(f, "HTTP {}", status),
            GeocodingError::Network(msg) => write!(f, "Network error: {}", msg),
            GeocodingError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeocodingError {}

#[derive(Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

impl ReverseResponse {
    /// `display_name` o, si falta o está vacío, "lat, lng" con seis decimales
    fn into_address(self, coords: Coordinates) -> String {
        self.display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| coords.format_fixed())
    }
}

/// Cliente Nominatim - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct GeocodingService {
    config: GeocodingConfig,
}

impl GeocodingService {
    pub fn new() -> Self {
        Self::with_config(CONFIG.geocoding.clone())
    }

    pub fn with_config(config: GeocodingConfig) -> Self {
        Self { config }
    }

    pub fn reverse_url(&self) -> String {
        format!("{}/reverse", self.config.nominatim_url)
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.config.nominatim_url)
    }

    /// Parámetros de `/reverse`
    pub fn reverse_params(&self, coords: Coordinates) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("lat", coords.lat.to_string()),
            ("lon", coords.lng.to_string()),
            ("accept-language", self.config.accept_language.clone()),
            ("addressdetails", "1".to_string()),
        ]
    }

    /// Parámetros de `/search`; el query se codifica al construir la URL
    pub fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", query.trim().to_string()),
            ("limit", self.config.search_limit.to_string()),
            ("accept-language", self.config.accept_language.clone()),
            ("addressdetails", "1".to_string()),
        ];
        if !self.config.search_country_codes.is_empty() {
            params.push(("countrycodes", self.config.search_country_codes.clone()));
        }
        params
    }

    /// Geocodificación inversa: dirección legible de un punto
    pub async fn reverse(&self, coords: Coordinates) -> Result<String, GeocodingError> {
        let response = fetch_with_timeout(
            &self.reverse_url(),
            self.reverse_params(coords),
            self.config.reverse_timeout_ms,
        )
        .await?;

        let data = response
            .json::<ReverseResponse>()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        Ok(data.into_address(coords))
    }

    /// Como `reverse` pero nunca falla: ante cualquier error devuelve las coordenadas
    pub async fn reverse_or_fallback(&self, coords: Coordinates) -> String {
        match self.reverse(coords).await {
            Ok(address) => address,
            Err(e) => {
                log::warn!("⚠️ [GEOCODING] Error en geocodificación inversa: {}", e);
                coords.format_fixed()
            }
        }
    }

    /// Búsqueda de lugares por texto
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, GeocodingError> {
        log::info!("🔍 [GEOCODING] Buscando: {}", query.trim());

        let response = fetch_with_timeout(
            &self.search_url(),
            self.search_params(query),
            self.config.search_timeout_ms,
        )
        .await?;

        let results = response
            .json::<Vec<SearchResult>>()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        log::info!("✅ [GEOCODING] {} resultados", results.len());
        Ok(results)
    }

    /// Consulta mínima para el diagnóstico; devuelve el número de resultados
    pub async fn probe(&self) -> Result<usize, GeocodingError> {
        let params = vec![
            ("format", "json".to_string()),
            ("q", "Madrid".to_string()),
            ("limit", "1".to_string()),
        ];
        let response = fetch_with_timeout(&self.search_url(), params, DIAGNOSTIC_PROBE_TIMEOUT_MS).await?;
        let results = response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;
        Ok(results.len())
    }
}

impl Default for GeocodingService {
    fn default() -> Self {
        Self::new()
    }
}

/// GET con AbortController: la petición se aborta pasado `timeout_ms`
async fn fetch_with_timeout(
    url: &str,
    params: Vec<(&'static str, String)>,
    timeout_ms: u32,
) -> Result<Response, GeocodingError> {
    let controller = AbortController::new()
        .map_err(|e| GeocodingError::Network(format!("{:?}", e)))?;
    let signal = controller.signal();

    let timed_out = Rc::new(Cell::new(false));
    // Al salir de la función el Timeout se cancela (drop)
    let _abort_guard = {
        let timed_out = timed_out.clone();
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let result = Request::get(url)
        .query(params.iter().map(|(k, v)| (*k, v.as_str())))
        .abort_signal(Some(&signal))
        .send()
        .await;

    let response = match result {
        Ok(response) => response,
        Err(_) if timed_out.get() => return Err(GeocodingError::Timeout),
        Err(e) => return Err(GeocodingError::Network(e.to_string())),
    };

    if !response.ok() {
        return Err(GeocodingError::Http(response.status()));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GeocodingService {
        GeocodingService::with_config(GeocodingConfig::default())
    }

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn reverse_params_carry_coordinates_and_language() {
        let params = service().reverse_params(Coordinates::new(10.5, -66.9));
        assert_eq!(param(&params, "format"), Some("json"));
        assert_eq!(param(&params, "lat"), Some("10.5"));
        assert_eq!(param(&params, "lon"), Some("-66.9"));
        assert_eq!(param(&params, "accept-language"), Some("es"));
        assert_eq!(param(&params, "addressdetails"), Some("1"));
    }

    #[test]
    fn search_params_trim_query_and_restrict_countries() {
        let params = service().search_params("  Plaza Mayor ");
        assert_eq!(param(&params, "q"), Some("Plaza Mayor"));
        assert_eq!(param(&params, "limit"), Some("5"));
        assert_eq!(param(&params, "countrycodes"), Some("es,mx,ar,co,pe,cl,ve,ec,bo,py,uy"));
    }

    #[test]
    fn empty_country_codes_are_omitted() {
        let mut config = GeocodingConfig::default();
        config.search_country_codes.clear();
        let params = GeocodingService::with_config(config).search_params("x");
        assert_eq!(param(&params, "countrycodes"), None);
    }

    #[test]
    fn urls_use_configured_base() {
        let s = service();
        assert_eq!(s.search_url(), "https://nominatim.openstreetmap.org/search");
        assert_eq!(s.reverse_url(), "https://nominatim.openstreetmap.org/reverse");
    }

    #[test]
    fn reverse_address_falls_back_to_coordinates() {
        let coords = Coordinates::new(40.4168, -3.7038);
        let parse = |json: &str| serde_json::from_str::<ReverseResponse>(json).unwrap().into_address(coords);

        assert_eq!(parse(r#"{"error":"Unable to geocode"}"#), "40.416800, -3.703800");
        assert_eq!(parse(r#"{"display_name":"   "}"#), "40.416800, -3.703800");
        assert_eq!(parse(r#"{"display_name":null}"#), "40.416800, -3.703800");
        assert_eq!(
            parse(r#"{"display_name":"Puerta del Sol, Madrid, España"}"#),
            "Puerta del Sol, Madrid, España"
        );
    }

    #[test]
    fn error_messages_map_to_user_text() {
        assert_eq!(GeocodingError::Timeout.user_message_key(), "busqueda_timeout");
        assert_eq!(GeocodingError::Http(503).user_message_key(), "busqueda_servidor");
        assert_eq!(GeocodingError::Network("x".into()).user_message_key(), "busqueda_generico");
        assert_eq!(GeocodingError::Http(404).to_string(), "HTTP 404");
    }
}
