pub mod location;
pub mod search;
pub mod layer;
pub mod map_error;
pub mod diagnostic;
pub mod toast;

pub use location::{Coordinates, LocationData};
pub use search::SearchResult;
pub use layer::MapLayer;
pub use map_error::{MapError, MapErrorKind};
pub use diagnostic::{DiagnosticResult, DiagnosticStatus, OverallStatus};
pub use toast::{Toast, ToastVariant};

/// Marca de tiempo ISO-8601 (UTC, milisegundos, sufijo `Z`) usada por todos los modelos
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_use_millis_and_zulu() {
        let stamp = now_iso();
        assert!(stamp.ends_with('Z'), "{}", stamp);
        // 2024-01-01T00:00:00.000Z
        assert_eq!(stamp.len(), 24, "{}", stamp);
        assert_eq!(&stamp[19..20], ".");
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
