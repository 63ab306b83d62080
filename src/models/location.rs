use serde::{Deserialize, Serialize};
use std::fmt;

/// Punto geográfico en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// "lat, lng" con seis decimales; se usa como dirección cuando falla la geocodificación
    pub fn format_fixed(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fixed())
    }
}

/// Ubicación seleccionada por el usuario.
///
/// El formato JSON es el del array `savedLocations` en localStorage:
/// `{ "lat": .., "lng": .., "address": "..", "timestamp": "ISO-8601" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub timestamp: String,
}

impl LocationData {
    pub fn new(coords: Coordinates, address: impl Into<String>) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
            address: address.into(),
            timestamp: super::now_iso(),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_fixed_uses_six_decimals() {
        let c = Coordinates::new(10.4806, -66.9036);
        assert_eq!(c.format_fixed(), "10.480600, -66.903600");
        assert_eq!(c.to_string(), c.format_fixed());
    }

    #[test]
    fn validity_checks_ranges_and_nan() {
        assert!(Coordinates::new(90.0, 180.0).is_valid());
        assert!(Coordinates::new(-90.0, -180.0).is_valid());
        assert!(!Coordinates::new(90.1, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn location_reads_saved_locations_format() {
        let json = r#"[{"lat":40.4168,"lng":-3.7038,"address":"Madrid, España","timestamp":"2024-01-01T10:00:00.000Z"}]"#;
        let parsed: Vec<LocationData> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].address, "Madrid, España");
        assert_eq!(parsed[0].coordinates(), Coordinates::new(40.4168, -3.7038));
    }

    #[test]
    fn new_location_is_stamped() {
        let loc = LocationData::new(Coordinates::new(1.0, 2.0), "x");
        assert!(chrono::DateTime::parse_from_rfc3339(&loc.timestamp).is_ok());
    }
}
