// ============================================================================
// SAVED LOCATIONS VIEWMODEL - Guardar / cargar / eliminar ubicaciones
// ============================================================================

use crate::services::location_store::LocationStore;
use crate::state::AppState;
use crate::utils::t;
use crate::viewmodels::{MapViewModel, ToastViewModel};

pub struct SavedLocationsViewModel;

impl SavedLocationsViewModel {
    pub fn load_on_start(state: &AppState) {
        match LocationStore::load() {
            Ok(locations) => {
                log::info!("💾 [SAVED] {} ubicaciones guardadas", locations.len());
                *state.saved_locations.borrow_mut() = locations;
            }
            Err(e) => {
                log::error!("❌ [SAVED] Error cargando ubicaciones guardadas: {}", e);
                ToastViewModel::error(state, "toast_error_almacenamiento", "toast_error_cargar_guardadas");
            }
        }
    }

    pub fn save_current(state: &AppState) {
        let selected = match state.selected_location.borrow().clone() {
            Some(location) => location,
            None => {
                ToastViewModel::error(state, "error", "toast_sin_seleccion");
                return;
            }
        };

        let updated = LocationStore::add(&state.saved_locations.borrow(), selected);
        match LocationStore::save(&updated) {
            Ok(()) => {
                *state.saved_locations.borrow_mut() = updated;
                ToastViewModel::info(state, "toast_guardada", t("toast_guardada_desc", &state.lang()));
            }
            Err(e) => {
                log::error!("❌ [SAVED] {}", e);
                ToastViewModel::error(state, "error", "toast_error_guardar");
            }
        }
        state.notify_subscribers();
    }

    /// Vuelve a seleccionar una ubicación guardada (sin geocodificar de nuevo)
    pub fn load(state: &AppState, index: usize) {
        let location = match state.saved_locations.borrow().get(index) {
            Some(location) => location.clone(),
            None => {
                ToastViewModel::error(state, "error", "toast_error_cargar_guardada");
                return;
            }
        };

        let coords = location.coordinates();
        MapViewModel::focus(state, coords);
        MapViewModel::select_point(state, coords, Some(location.address));
    }

    pub fn delete(state: &AppState, index: usize) {
        let updated = LocationStore::remove(&state.saved_locations.borrow(), index);
        match LocationStore::save(&updated) {
            Ok(()) => {
                *state.saved_locations.borrow_mut() = updated;
                ToastViewModel::info(state, "toast_eliminada", t("toast_eliminada_desc", &state.lang()));
            }
            Err(e) => {
                log::error!("❌ [SAVED] {}", e);
                ToastViewModel::error(state, "error", "toast_error_eliminar");
            }
        }
        state.notify_subscribers();
    }
}
