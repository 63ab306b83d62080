// ============================================================================
// DIAGNOSTICS SERVICE - Pruebas del panel de diagnóstico
// ============================================================================
// Cada prueba es independiente y devuelve su DiagnosticResult; el orden, las
// pausas y el estado de la pantalla los gestiona DiagnosticsViewModel.
// ============================================================================

use crate::models::DiagnosticResult;
use crate::services::geocoding_service::{GeocodingError, GeocodingService};
use crate::services::geolocation_service::{GeolocationOptions, GeolocationService};
use crate::services::leaflet_loader::LeafletLoader;
use crate::services::location_store::LocationStore;
use crate::services::network_monitor::{check_connectivity, navigator_on_line};
use crate::utils::leaflet_ffi::leaflet_version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Network,
    Leaflet,
    Nominatim,
    Geolocation,
    Storage,
}

impl Probe {
    /// Orden de ejecución
    pub const ALL: [Probe; 5] = [
        Probe::Network,
        Probe::Leaflet,
        Probe::Nominatim,
        Probe::Geolocation,
        Probe::Storage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Probe::Network => "Conectividad de Red",
            Probe::Leaflet => "Biblioteca Leaflet",
            Probe::Nominatim => "API Nominatim",
            Probe::Geolocation => "Geolocalización",
            Probe::Storage => "Almacenamiento Local",
        }
    }
}

pub struct DiagnosticsService;

impl DiagnosticsService {
    /// Ejecuta una prueba y le añade su duración al detalle
    pub async fn run(probe: Probe) -> DiagnosticResult {
        let started = js_sys::Date::now();
        log::info!("🩺 [DIAG] {}...", probe.name());

        let outcome = match probe {
            Probe::Network => Self::network().await,
            Probe::Leaflet => Self::leaflet().await,
            Probe::Nominatim => Self::nominatim().await,
            Probe::Geolocation => Self::geolocation().await,
            Probe::Storage => Self::storage(),
        };

        match outcome {
            Ok(result) => {
                let elapsed = (js_sys::Date::now() - started).round() as i64;
                log::info!("🩺 [DIAG] {}: {:?} ({}ms)", probe.name(), result.status, elapsed);
                result.with_duration(elapsed)
            }
            Err(e) => {
                log::error!("❌ [DIAG] {} falló: {}", probe.name(), e);
                DiagnosticResult::error(probe.name(), "Error en la prueba", e)
            }
        }
    }

    async fn network() -> Result<DiagnosticResult, String> {
        let name = Probe::Network.name();
        if navigator_on_line() == Some(false) {
            return Ok(DiagnosticResult::error(
                name,
                "Sin conexión a internet",
                "El navegador reporta que no hay conexión",
            ));
        }
        if check_connectivity().await {
            Ok(DiagnosticResult::success(
                name,
                "Conexión a internet activa",
                "Acceso a OpenStreetMap confirmado",
            ))
        } else {
            Ok(DiagnosticResult::error(
                name,
                "Error de conectividad",
                "No se puede acceder a los servidores de mapas",
            ))
        }
    }

    async fn leaflet() -> Result<DiagnosticResult, String> {
        let name = Probe::Leaflet.name();
        if LeafletLoader::is_loaded() {
            let version = leaflet_version().unwrap_or_else(|| "Desconocida".to_string());
            return Ok(DiagnosticResult::success(
                name,
                "Leaflet cargado correctamente",
                format!("Versión: {}", version),
            ));
        }
        match LeafletLoader::probe().await {
            Ok(()) => Ok(DiagnosticResult::warning(
                name,
                "Leaflet disponible pero no cargado",
                "La biblioteca se puede descargar pero no está inicializada",
            )),
            Err(e) => Ok(DiagnosticResult::error(name, "Error cargando Leaflet", e)),
        }
    }

    async fn nominatim() -> Result<DiagnosticResult, String> {
        let name = Probe::Nominatim.name();
        let result = match GeocodingService::new().probe().await {
            Ok(count) => DiagnosticResult::success(
                name,
                "Servicio de geocodificación disponible",
                format!("Resultados encontrados: {}", count),
            ),
            Err(e) => {
                let (message, details) = nominatim_failure(&e);
                DiagnosticResult::error(name, message, details)
            }
        };
        Ok(result)
    }

    async fn geolocation() -> Result<DiagnosticResult, String> {
        let name = Probe::Geolocation.name();
        match GeolocationService::current_position(GeolocationOptions::for_diagnostics()).await {
            Ok(position) => Ok(DiagnosticResult::success(
                name,
                "Geolocalización disponible",
                format!("Precisión: {}m", position.accuracy),
            )),
            Err(e) => {
                let (message, details) = e.diagnostic_texts();
                let result = if e == crate::services::geolocation_service::GeolocationError::Unsupported {
                    DiagnosticResult::error(name, message, details)
                } else {
                    DiagnosticResult::warning(name, message, details)
                };
                Ok(result)
            }
        }
    }

    fn storage() -> Result<DiagnosticResult, String> {
        let name = Probe::Storage.name();
        if web_sys::window().is_none() {
            return Err("window no disponible".to_string());
        }
        match LocationStore::self_test() {
            Ok(()) => Ok(DiagnosticResult::success(
                name,
                "LocalStorage funcionando",
                "Las ubicaciones se pueden guardar localmente",
            )),
            Err(e) => {
                log::warn!("⚠️ [DIAG] LocalStorage: {}", e);
                Ok(DiagnosticResult::error(
                    name,
                    "Error en LocalStorage",
                    "No se pueden guardar ubicaciones localmente",
                ))
            }
        }
    }
}

/// (mensaje, detalle) para un fallo de la prueba de Nominatim
fn nominatim_failure(error: &GeocodingError) -> (String, String) {
    match error {
        GeocodingError::Timeout => (
            "Timeout en Nominatim".to_string(),
            "El servicio tardó más de 5 segundos en responder".to_string(),
        ),
        GeocodingError::Http(status) => {
            ("Error del servidor Nominatim".to_string(), format!("HTTP {}", status))
        }
        other => ("Error en el servicio de geocodificación".to_string(), other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_run_in_fixed_order() {
        let names: Vec<_> = Probe::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            [
                "Conectividad de Red",
                "Biblioteca Leaflet",
                "API Nominatim",
                "Geolocalización",
                "Almacenamiento Local"
            ]
        );
    }

    #[test]
    fn nominatim_failures_are_explained() {
        assert_eq!(nominatim_failure(&GeocodingError::Timeout).0, "Timeout en Nominatim");
        assert_eq!(
            nominatim_failure(&GeocodingError::Http(502)),
            ("Error del servidor Nominatim".to_string(), "HTTP 502".to_string())
        );
        assert_eq!(
            nominatim_failure(&GeocodingError::Network("fallo".into())).0,
            "Error en el servicio de geocodificación"
        );
    }
}
