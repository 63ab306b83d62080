// ============================================================================
// MAP ERROR VIEW - Alerta, reintento y panel de diagnóstico del fallo
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, reload_page, text_element, ElementBuilder};
use crate::models::MapError;
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::MapViewModel;

pub const RETRY_BUTTON_ID: &str = "map-retry";

pub fn render_map_error(state: &AppState, error: &MapError) -> Result<Element, JsValue> {
    let lang = state.lang();
    let container = ElementBuilder::new("div")?.class("map-error").build();

    // Alerta
    let alert = ElementBuilder::new("div")?
        .class("alert alert-destructive")
        .attr("role", "alert")?
        .build();
    append_child(&alert, &text_element("strong", "alert-title", &format!("⚠️ {}", error.message))?)?;
    if let Some(details) = &error.details {
        append_child(&alert, &text_element("p", "alert-description", details)?)?;
    }
    append_child(&container, &alert)?;

    // Acciones
    let retry_label = state.lifecycle.borrow().retry_label();
    let actions = ElementBuilder::new("div")?.class("map-error-actions").build();
    let retry = ElementBuilder::new("button")?
        .id(RETRY_BUTTON_ID)?
        .class("btn btn-primary")
        .text(&format!("🔄 {} ({})", t("reintentar", &lang), retry_label))
        // Con el máximo alcanzado sigue activo: el clic muestra el error de reintentos agotados
        .flag("disabled", !state.online())?
        .build();
    {
        let state = state.clone();
        on_click(&retry, move |_| MapViewModel::retry(&state))?;
    }
    append_child(&actions, &retry)?;

    let reload = ElementBuilder::new("button")?
        .class("btn btn-outline")
        .text(&t("recargar_pagina", &lang))
        .build();
    on_click(&reload, |_| {
        if let Err(e) = reload_page() {
            log::error!("❌ [MAP] No se pudo recargar la página: {:?}", e);
        }
    })?;
    append_child(&actions, &reload)?;
    append_child(&container, &actions)?;

    append_child(&container, &render_error_diagnosis(state, error, &retry_label)?)?;
    Ok(container)
}

fn render_error_diagnosis(state: &AppState, error: &MapError, retry_label: &str) -> Result<Element, JsValue> {
    let lang = state.lang();
    let card = ElementBuilder::new("div")?.class("card error-diagnosis").build();
    append_child(&card, &text_element("h3", "card-title", &t("diagnostico_error", &lang))?)?;

    let grid = ElementBuilder::new("dl")?.class("diagnosis-grid").build();

    let (badge_class, badge_text) = if state.online() {
        ("badge badge-success", t("conectado", &lang))
    } else {
        ("badge badge-destructive", t("desconectado", &lang))
    };
    append_child(&grid, &text_element("dt", "field-label", &t("estado_conexion", &lang))?)?;
    let connection = ElementBuilder::new("dd")?.class("field-value").build();
    append_child(&connection, &text_element("span", badge_class, &badge_text)?)?;
    append_child(&grid, &connection)?;

    append_child(&grid, &text_element("dt", "field-label", &t("tipo_error", &lang))?)?;
    append_child(&grid, &text_element("dd", "field-value", error.kind.as_str())?)?;

    append_child(&grid, &text_element("dt", "field-label", &t("reintentos", &lang))?)?;
    append_child(&grid, &text_element("dd", "field-value", retry_label)?)?;

    append_child(&grid, &text_element("dt", "field-label", &t("marca_tiempo", &lang))?)?;
    append_child(&grid, &text_element("dd", "field-value", &local_timestamp(&error.timestamp))?)?;

    append_child(&card, &grid)?;
    Ok(card)
}

/// ISO-8601 → fecha local "es-ES"
pub fn local_timestamp(iso: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }
    String::from(date.to_locale_string("es-ES", &JsValue::UNDEFINED))
}

/// ISO-8601 → hora local "es-ES"
pub fn local_time(iso: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }
    String::from(date.to_locale_time_string("es-ES"))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::models::MapLayer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn failed_after_max_retries(online: bool) -> (AppState, MapError) {
        let state = AppState::with_preferences("ES".to_string(), MapLayer::Osm, online);
        {
            let mut lifecycle = state.lifecycle.borrow_mut();
            lifecycle.fail(MapError::offline());
            for _ in 0..lifecycle.max_retries() {
                lifecycle.begin_retry();
                lifecycle.fail(MapError::load_failure("Timeout cargando Leaflet"));
            }
            assert_eq!(lifecycle.retry_count(), lifecycle.max_retries());
        }
        let error = state.lifecycle.borrow().error().cloned().unwrap();
        (state, error)
    }

    #[wasm_bindgen_test]
    fn retry_stays_enabled_at_maximum() {
        let (state, error) = failed_after_max_retries(true);
        let view = render_map_error(&state, &error).unwrap();
        let retry = view.query_selector(&format!("#{}", RETRY_BUTTON_ID)).unwrap().unwrap();
        assert!(!retry.has_attribute("disabled"));
        let label = retry.text_content().unwrap_or_default();
        assert!(label.contains("3/3"), "{}", label);
    }

    #[wasm_bindgen_test]
    fn retry_disabled_offline() {
        let (state, error) = failed_after_max_retries(false);
        let view = render_map_error(&state, &error).unwrap();
        let retry = view.query_selector(&format!("#{}", RETRY_BUTTON_ID)).unwrap().unwrap();
        assert!(retry.has_attribute("disabled"));
    }
}
