// ============================================================================
// INCREMENTAL DOM UPDATES - Actualización incremental del DOM
// ============================================================================
// Solo actualiza elementos específicos que cambiaron, sin re-renderizar todo.
// Si el elemento objetivo no existe devuelve Err y el llamador hace un
// render completo.
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::dom::{clear_children, get_element_by_id, set_style, set_text_content};
use crate::state::app_state::{AppState, Route};
use crate::views::diagnostics::{fill_diagnostics, DIAGNOSTIC_RESULTS_ID, DIAGNOSTIC_SUMMARY_ID};
use crate::views::location_selector::{NETWORK_BANNER_ID, PROGRESS_BAR_ID, PROGRESS_TEXT_ID};
use crate::views::toasts::{fill_toasts, TOAST_REGION_ID};

fn needs_full_render(what: &str) -> JsValue {
    JsValue::from_str(&format!("{} no encontrado: needs full render", what))
}

/// Región de toasts
pub fn update_toasts(state: &AppState) -> Result<(), JsValue> {
    let region = get_element_by_id(TOAST_REGION_ID).ok_or_else(|| needs_full_render(TOAST_REGION_ID))?;
    clear_children(&region);
    fill_toasts(&region, state)
}

/// Barra de progreso de la carga del mapa
pub fn update_loading_progress(state: &AppState) -> Result<(), JsValue> {
    let progress = match state.lifecycle.borrow().progress() {
        Some(progress) => progress,
        // Ya no está cargando: la vista cambia entera
        None => return Err(needs_full_render("progreso")),
    };

    let bar = get_element_by_id(PROGRESS_BAR_ID).ok_or_else(|| needs_full_render(PROGRESS_BAR_ID))?;
    let text = get_element_by_id(PROGRESS_TEXT_ID).ok_or_else(|| needs_full_render(PROGRESS_TEXT_ID))?;

    set_style(&bar, "width", &format!("{}%", progress))?;
    set_text_content(&text, &format!("{}%", progress));
    log::debug!("📶 [INCREMENTAL] Progreso del mapa: {}%", progress);
    Ok(())
}

/// Cambio de conexión. En el selector la conexión habilita o deshabilita
/// búsqueda, "Mi ubicación" y reintento además del banner: re-render completo.
/// El diagnóstico no muestra nada que dependa de ella.
pub fn update_network_banner(state: &AppState) -> Result<(), JsValue> {
    match *state.route.borrow() {
        Route::Selector => Err(needs_full_render(NETWORK_BANNER_ID)),
        Route::Diagnostics => Ok(()),
    }
}

/// Resumen y lista del diagnóstico
pub fn update_diagnostics(state: &AppState) -> Result<(), JsValue> {
    let summary = get_element_by_id(DIAGNOSTIC_SUMMARY_ID).ok_or_else(|| needs_full_render(DIAGNOSTIC_SUMMARY_ID))?;
    let results = get_element_by_id(DIAGNOSTIC_RESULTS_ID).ok_or_else(|| needs_full_render(DIAGNOSTIC_RESULTS_ID))?;
    clear_children(&summary);
    clear_children(&results);
    fill_diagnostics(&summary, &results, state)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::models::MapLayer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn network_change_rerenders_selector_only() {
        let state = AppState::with_preferences("ES".to_string(), MapLayer::Osm, true);
        let err = update_network_banner(&state).unwrap_err();
        assert!(format!("{:?}", err).contains("needs full render"));

        *state.route.borrow_mut() = Route::Diagnostics;
        assert!(update_network_banner(&state).is_ok());
    }
}
