// ============================================================================
// LOCATION STORE - Ubicaciones guardadas en localStorage
// ============================================================================

use crate::models::LocationData;
use crate::utils::storage::{
    get_local_storage, load_string_pref, remove_from_storage, save_raw_to_storage, save_to_storage,
};
use crate::utils::{SAVED_LOCATIONS_KEY, STORAGE_TEST_KEY, STORAGE_TEST_VALUE};

pub struct LocationStore;

impl LocationStore {
    /// Lee la lista guardada. Sin valor → vacía; JSON que no es array → vacía.
    pub fn load() -> Result<Vec<LocationData>, String> {
        let storage = get_local_storage().ok_or("localStorage no disponible")?;
        let raw = storage
            .get_item(SAVED_LOCATIONS_KEY)
            .map_err(|e| format!("Error leyendo localStorage: {:?}", e))?;
        parse_saved(raw.as_deref())
    }

    pub fn save(locations: &[LocationData]) -> Result<(), String> {
        save_to_storage(SAVED_LOCATIONS_KEY, locations)?;
        log::info!("💾 [STORE] {} ubicaciones guardadas", locations.len());
        Ok(())
    }

    /// Nueva lista con `location` al final
    pub fn add(locations: &[LocationData], location: LocationData) -> Vec<LocationData> {
        let mut updated = locations.to_vec();
        updated.push(location);
        updated
    }

    /// Nueva lista sin el elemento `index`; índice fuera de rango → misma lista
    pub fn remove(locations: &[LocationData], index: usize) -> Vec<LocationData> {
        locations
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, loc)| loc.clone())
            .collect()
    }

    /// Escribe, lee y borra una clave de prueba
    pub fn self_test() -> Result<(), String> {
        save_raw_to_storage(STORAGE_TEST_KEY, STORAGE_TEST_VALUE)?;
        let retrieved = load_string_pref(STORAGE_TEST_KEY);
        remove_from_storage(STORAGE_TEST_KEY);

        if retrieved.as_deref() == Some(STORAGE_TEST_VALUE) {
            Ok(())
        } else {
            Err("Datos no coinciden".to_string())
        }
    }
}

fn parse_saved(raw: Option<&str>) -> Result<Vec<LocationData>, String> {
    let raw = match raw {
        Some(r) => r,
        None => return Ok(Vec::new()),
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("JSON inválido en {}: {}", SAVED_LOCATIONS_KEY, e))?;
    if !value.is_array() {
        log::warn!("⚠️ [STORE] {} no es un array, se ignora", SAVED_LOCATIONS_KEY);
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| format!("Ubicaciones con formato inválido: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn loc(address: &str) -> LocationData {
        LocationData::new(Coordinates::new(1.0, 2.0), address)
    }

    #[test]
    fn missing_or_non_array_values_are_empty() {
        assert_eq!(parse_saved(None), Ok(Vec::new()));
        assert_eq!(parse_saved(Some(r#"{"lat":1}"#)), Ok(Vec::new()));
        assert_eq!(parse_saved(Some("42")), Ok(Vec::new()));
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(parse_saved(Some("[{")).is_err());
        assert!(parse_saved(Some(r#"[{"lat":"x"}]"#)).is_err());
    }

    #[test]
    fn parses_stored_array() {
        let raw = r#"[{"lat":40.4,"lng":-3.7,"address":"Madrid","timestamp":"2024-01-01T00:00:00Z"}]"#;
        let list = parse_saved(Some(raw)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].address, "Madrid");
    }

    #[test]
    fn add_appends_without_touching_input() {
        let original = vec![loc("a")];
        let updated = LocationStore::add(&original, loc("b"));
        assert_eq!(original.len(), 1);
        assert_eq!(updated.iter().map(|l| l.address.as_str()).collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn remove_by_index() {
        let list = vec![loc("a"), loc("b"), loc("c")];
        let updated = LocationStore::remove(&list, 1);
        assert_eq!(updated.iter().map(|l| l.address.as_str()).collect::<Vec<_>>(), ["a", "c"]);
        assert_eq!(LocationStore::remove(&list, 7), list);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn self_test_round_trips_and_cleans_up() {
        assert_eq!(LocationStore::self_test(), Ok(()));
        assert_eq!(load_string_pref(STORAGE_TEST_KEY), None);
    }
}
