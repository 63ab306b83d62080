use serde::{Deserialize, Serialize};
use std::fmt;

/// Categoría de fallo del mapa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapErrorKind {
    Network,
    Script,
    Api,
    Initialization,
    Unknown,
}

impl MapErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapErrorKind::Network => "network",
            MapErrorKind::Script => "script",
            MapErrorKind::Api => "api",
            MapErrorKind::Initialization => "initialization",
            MapErrorKind::Unknown => "unknown",
        }
    }
}

/// Error visible del mapa (alerta + panel de diagnóstico)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapError {
    pub kind: MapErrorKind,
    pub message: String,
    pub details: Option<String>,
    pub timestamp: String,
}

impl MapError {
    pub fn new(kind: MapErrorKind, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
            timestamp: super::now_iso(),
        }
    }

    pub fn offline() -> Self {
        Self::new(
            MapErrorKind::Network,
            "Sin conexión a internet",
            Some("Verifica tu conexión y vuelve a intentar".to_string()),
        )
    }

    pub fn retries_exhausted() -> Self {
        Self::new(
            MapErrorKind::Unknown,
            "Máximo número de reintentos alcanzado",
            Some("Por favor, recarga la página o verifica tu conexión".to_string()),
        )
    }

    pub fn initialization(details: impl Into<String>) -> Self {
        Self::new(
            MapErrorKind::Initialization,
            "Error inicializando el mapa",
            Some(details.into()),
        )
    }

    /// Fallo en la carga (conectividad o script); el tipo se deduce del detalle
    pub fn load_failure(details: impl Into<String>) -> Self {
        let details = details.into();
        Self::new(classify_load_failure(&details), "Error cargando el mapa", Some(details))
    }

    pub fn is_network(&self) -> bool {
        self.kind == MapErrorKind::Network
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "[{}] {}: {}", self.kind.as_str(), self.message, details),
            None => write!(f, "[{}] {}", self.kind.as_str(), self.message),
        }
    }
}

impl std::error::Error for MapError {}

/// Un fallo que menciona la conexión es de red; cualquier otro se atribuye al script
pub fn classify_load_failure(details: &str) -> MapErrorKind {
    let lower = details.to_lowercase();
    if lower.contains("internet") || lower.contains("network") {
        MapErrorKind::Network
    } else {
        MapErrorKind::Script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_by_message() {
        assert_eq!(classify_load_failure("Sin conexión a internet"), MapErrorKind::Network);
        assert_eq!(classify_load_failure("Network error: failed to fetch"), MapErrorKind::Network);
        assert_eq!(classify_load_failure("Timeout cargando Leaflet"), MapErrorKind::Script);
        assert_eq!(classify_load_failure("Error cargando Leaflet JS"), MapErrorKind::Script);
    }

    #[test]
    fn canned_errors() {
        let offline = MapError::offline();
        assert!(offline.is_network());
        assert_eq!(offline.message, "Sin conexión a internet");

        let exhausted = MapError::retries_exhausted();
        assert_eq!(exhausted.kind, MapErrorKind::Unknown);

        let init = MapError::initialization("Contenedor del mapa no encontrado");
        assert_eq!(init.kind, MapErrorKind::Initialization);
        assert_eq!(init.details.as_deref(), Some("Contenedor del mapa no encontrado"));

        let load = MapError::load_failure("Sin conexión a internet");
        assert!(load.is_network());
        assert_eq!(load.message, "Error cargando el mapa");
    }

    #[test]
    fn display_includes_kind() {
        let err = MapError::new(MapErrorKind::Api, "x", None);
        assert_eq!(err.to_string(), "[api] x");
    }
}
