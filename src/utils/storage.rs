use gloo_storage::{LocalStorage, Storage};
use serde::Serialize;
use web_sys::window;

pub fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_to_storage<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), String> {
    LocalStorage::set(key, value).map_err(|e| format!("Error guardando en localStorage: {}", e))
}

pub fn remove_from_storage(key: &str) {
    LocalStorage::delete(key);
}

/// Preferencia en texto plano (sin JSON), compatible con valores escritos a mano
pub fn load_string_pref(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// Escribe el texto tal cual, sin serializar a JSON
pub fn save_raw_to_storage(key: &str, value: &str) -> Result<(), String> {
    get_local_storage()
        .ok_or("localStorage no disponible")?
        .set_item(key, value)
        .map_err(|e| format!("Error escribiendo en localStorage: {:?}", e))
}

pub fn save_string_pref(key: &str, value: &str) {
    if let Err(e) = save_raw_to_storage(key, value) {
        log::warn!("⚠️ [STORAGE] No se pudo guardar la preferencia {}: {}", key, e);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn raw_values_are_stored_without_quotes() {
        save_raw_to_storage("raw-pref-check", "test-data").unwrap();
        assert_eq!(load_string_pref("raw-pref-check").as_deref(), Some("test-data"));

        save_to_storage("raw-pref-check", "test-data").unwrap();
        assert_eq!(load_string_pref("raw-pref-check").as_deref(), Some("\"test-data\""));
        remove_from_storage("raw-pref-check");
        assert_eq!(load_string_pref("raw-pref-check"), None);
    }
}
