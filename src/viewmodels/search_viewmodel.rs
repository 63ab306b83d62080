// ============================================================================
// SEARCH VIEWMODEL - Búsqueda de direcciones (Nominatim)
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::services::geocoding_service::GeocodingService;
use crate::state::AppState;
use crate::viewmodels::{MapViewModel, ToastViewModel};

pub struct SearchViewModel;

impl SearchViewModel {
    /// Solo guarda el texto: re-renderizar aquí haría perder el foco del input
    pub fn set_query(state: &AppState, query: String) {
        *state.search_query.borrow_mut() = query;
    }

    pub fn search(state: &AppState) {
        let query = state.search_query.borrow().trim().to_string();
        if query.is_empty() || *state.is_searching.borrow() {
            return;
        }

        *state.is_searching.borrow_mut() = true;
        state.notify_subscribers();

        let state = state.clone();
        spawn_local(async move {
            match GeocodingService::new().search(&query).await {
                Ok(results) => {
                    if results.is_empty() {
                        ToastViewModel::error(&state, "toast_no_encontrado", "toast_no_encontrado_desc");
                    }
                    *state.search_results.borrow_mut() = results;
                }
                Err(e) => {
                    log::error!("❌ [SEARCH] {}", e);
                    state.search_results.borrow_mut().clear();
                    ToastViewModel::error(&state, "toast_error_busqueda", e.user_message_key());
                }
            }
            *state.is_searching.borrow_mut() = false;
            state.notify_subscribers();
        });
    }

    /// Selecciona un resultado: centra, actualiza la ubicación y limpia la búsqueda
    pub fn select_result(state: &AppState, index: usize) {
        let result = match state.search_results.borrow().get(index) {
            Some(result) => result.clone(),
            None => return,
        };

        let coords = match result.coordinates() {
            Ok(coords) if coords.is_valid() => coords,
            _ => {
                log::error!("❌ [SEARCH] Coordenadas inválidas en {}", result.display_name);
                ToastViewModel::error(state, "error", "toast_error_seleccion");
                return;
            }
        };

        MapViewModel::focus(state, coords);

        let state = state.clone();
        spawn_local(async move {
            MapViewModel::update_location(&state, coords, Some(result.display_name)).await;
            state.search_results.borrow_mut().clear();
            state.search_query.borrow_mut().clear();
            state.notify_subscribers();
        });
    }
}
