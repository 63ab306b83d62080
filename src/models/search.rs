use serde::{Deserialize, Deserializer, Serialize};
use super::Coordinates;

/// Resultado de búsqueda de Nominatim (`/search?format=json`).
///
/// Nominatim devuelve `lat`/`lon` como cadenas y `place_id` como número.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(deserialize_with = "deserialize_place_id")]
    pub place_id: String,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub importance: f64,
}

/// Acepta `place_id` numérico o string
fn deserialize_place_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("place_id inválido: {}", other))),
    }
}

impl SearchResult {
    pub fn coordinates(&self) -> Result<Coordinates, String> {
        let lat = self.lat.trim().parse::<f64>();
        let lng = self.lon.trim().parse::<f64>();
        match (lat, lng) {
            (Ok(lat), Ok(lng)) if !lat.is_nan() && !lng.is_nan() => Ok(Coordinates::new(lat, lng)),
            _ => Err("Coordenadas inválidas".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOMINATIM_SAMPLE: &str = r#"[
        {"place_id": 282565683, "licence": "ODbL", "osm_type": "relation", "osm_id": 5326784,
         "lat": "40.4167047", "lon": "-3.7035825", "class": "boundary", "type": "administrative",
         "place_rank": 8, "importance": 0.8, "display_name": "Madrid, Comunidad de Madrid, España"}
    ]"#;

    #[test]
    fn parses_nominatim_payload() {
        let results: Vec<SearchResult> = serde_json::from_str(NOMINATIM_SAMPLE).unwrap();
        assert_eq!(results[0].place_id, "282565683");
        assert_eq!(results[0].kind, "administrative");
        let coords = results[0].coordinates().unwrap();
        assert!((coords.lat - 40.4167047).abs() < 1e-9);
        assert!((coords.lng + 3.7035825).abs() < 1e-9);
    }

    #[test]
    fn string_place_id_is_accepted() {
        let json = r#"{"place_id":"abc","display_name":"x","lat":"1","lon":"2"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.place_id, "abc");
        assert_eq!(result.importance, 0.0);
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let mut result: SearchResult =
            serde_json::from_str(r#"{"place_id":1,"display_name":"x","lat":"NaN","lon":"2"}"#).unwrap();
        assert_eq!(result.coordinates().unwrap_err(), "Coordenadas inválidas");
        result.lat = "norte".to_string();
        assert!(result.coordinates().is_err());
    }
}
