// ============================================================================
// GEOLOCATION SERVICE - navigator.geolocation.getCurrentPosition como future
// ============================================================================

use std::fmt;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::CONFIG;
use crate::models::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl GeolocationOptions {
    /// Botón "Mi ubicación"
    pub fn for_selector() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: CONFIG.map_config.geolocation_timeout_ms,
            maximum_age_ms: 60_000,
        }
    }

    /// Prueba del diagnóstico: rápida, sin caché
    pub fn for_diagnostics() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout_ms: 5_000,
            maximum_age_ms: 0,
        }
    }

    fn to_js(self) -> web_sys::PositionOptions {
        let options = web_sys::PositionOptions::new();
        options.set_enable_high_accuracy(self.enable_high_accuracy);
        options.set_timeout(self.timeout_ms);
        options.set_maximum_age(self.maximum_age_ms);
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: Coordinates,
    /// Metros
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    Unsupported,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl GeolocationError {
    /// Códigos de `GeolocationPositionError`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }

    /// Clave i18n del mensaje para el usuario
    pub fn user_message_key(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "geo_no_soportada",
            GeolocationError::PermissionDenied => "geo_permiso_denegado",
            GeolocationError::PositionUnavailable => "geo_no_disponible",
            GeolocationError::Timeout => "geo_timeout",
            GeolocationError::Unknown => "geo_generico",
        }
    }

    /// (mensaje, detalle) del panel de diagnóstico
    pub fn diagnostic_texts(&self) -> (&'static str, &'static str) {
        match self {
            GeolocationError::Unsupported => (
                "Geolocalización no soportada",
                "El navegador no soporta la API de geolocalización",
            ),
            GeolocationError::PermissionDenied => {
                ("Permisos denegados", "El usuario denegó el acceso a la ubicación")
            }
            GeolocationError::PositionUnavailable => {
                ("Ubicación no disponible", "No se pudo determinar la ubicación")
            }
            GeolocationError::Timeout => {
                ("Timeout de geolocalización", "La solicitud tardó demasiado tiempo")
            }
            GeolocationError::Unknown => ("Error de geolocalización", "Error desconocido"),
        }
    }
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic_texts().0)
    }
}

impl std::error::Error for GeolocationError {}

pub struct GeolocationService;

impl GeolocationService {
    /// `navigator.geolocation`, si el navegador lo expone
    fn geolocation() -> Option<JsValue> {
        let window = web_sys::window()?;
        let navigator = js_sys::Reflect::get(&window, &"navigator".into()).ok()?;
        let geolocation = js_sys::Reflect::get(&navigator, &"geolocation".into()).ok()?;
        if geolocation.is_undefined() || geolocation.is_null() {
            None
        } else {
            Some(geolocation)
        }
    }

    pub fn is_supported() -> bool {
        Self::geolocation().is_some()
    }

    pub async fn current_position(options: GeolocationOptions) -> Result<Position, GeolocationError> {
        let geolocation = Self::geolocation().ok_or(GeolocationError::Unsupported)?;
        let get_current_position = js_sys::Reflect::get(&geolocation, &"getCurrentPosition".into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(GeolocationError::Unsupported)?;

        let js_options = options.to_js();
        let mut call_error = None;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            if let Err(e) = get_current_position.call3(&geolocation, &resolve, &reject, &js_options) {
                call_error = Some(e);
            }
        });
        if let Some(e) = call_error {
            log::error!("❌ [GEO] getCurrentPosition lanzó: {:?}", e);
            return Err(GeolocationError::Unknown);
        }

        match JsFuture::from(promise).await {
            Ok(position) => read_position(&position).ok_or(GeolocationError::Unknown),
            Err(error) => {
                let code = js_sys::Reflect::get(&error, &"code".into())
                    .ok()
                    .and_then(|c| c.as_f64())
                    .map(|c| c as u16)
                    .unwrap_or(0);
                let err = GeolocationError::from_code(code);
                log::warn!("⚠️ [GEO] {} (código {})", err, code);
                Err(err)
            }
        }
    }
}

fn read_position(position: &JsValue) -> Option<Position> {
    let coords = js_sys::Reflect::get(position, &"coords".into()).ok()?;
    let field = |name: &str| js_sys::Reflect::get(&coords, &JsValue::from_str(name)).ok()?.as_f64();
    Some(Position {
        coords: Coordinates::new(field("latitude")?, field("longitude")?),
        accuracy: field("accuracy").unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_errors() {
        assert_eq!(GeolocationError::from_code(1), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(2), GeolocationError::PositionUnavailable);
        assert_eq!(GeolocationError::from_code(3), GeolocationError::Timeout);
        assert_eq!(GeolocationError::from_code(0), GeolocationError::Unknown);
        assert_eq!(GeolocationError::from_code(9), GeolocationError::Unknown);
    }

    #[test]
    fn messages_per_error() {
        assert_eq!(GeolocationError::Timeout.user_message_key(), "geo_timeout");
        assert_eq!(GeolocationError::PermissionDenied.diagnostic_texts().0, "Permisos denegados");
        assert_eq!(GeolocationError::Unknown.to_string(), "Error de geolocalización");
    }

    #[test]
    fn option_presets() {
        let selector = GeolocationOptions::for_selector();
        assert!(selector.enable_high_accuracy);
        assert_eq!(selector.timeout_ms, 10_000);
        assert_eq!(selector.maximum_age_ms, 60_000);

        let diag = GeolocationOptions::for_diagnostics();
        assert!(!diag.enable_high_accuracy);
        assert_eq!(diag.timeout_ms, 5_000);
        assert_eq!(diag.maximum_age_ms, 0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn position_options_carry_preset() {
        let options = GeolocationOptions::for_diagnostics().to_js();
        let get = |name: &str| js_sys::Reflect::get(&options, &JsValue::from_str(name)).unwrap();
        assert_eq!(get("enableHighAccuracy").as_bool(), Some(false));
        assert_eq!(get("timeout").as_f64(), Some(5_000.0));
        assert_eq!(get("maximumAge").as_f64(), Some(0.0));
    }
}
