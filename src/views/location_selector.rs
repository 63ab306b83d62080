// ============================================================================
// LOCATION SELECTOR VIEW - Mapa, búsqueda, selección y guardados (Rust puro)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{
    append_child, create_element, event_target_value, on_change, on_click, on_input, on_keydown,
    set_attribute, text_element, ElementBuilder,
};
use crate::models::{LocationData, MapLayer, SearchResult};
use crate::state::app_state::AppState;
use crate::state::MapPhase;
use crate::utils::i18n::t;
use crate::utils::MAP_CONTAINER_ID;
use crate::viewmodels::{MapViewModel, SavedLocationsViewModel, SearchViewModel};
use crate::views::map_error::{local_timestamp, render_map_error};

pub const NETWORK_BANNER_ID: &str = "network-banner";
pub const LOADING_OVERLAY_ID: &str = "map-loading";
pub const PROGRESS_BAR_ID: &str = "map-progress-bar";
pub const PROGRESS_TEXT_ID: &str = "map-progress-text";
pub const SEARCH_INPUT_ID: &str = "search-input";
pub const SEARCH_BUTTON_ID: &str = "search-button";
pub const LOCATE_BUTTON_ID: &str = "locate-button";

/// Contenedor del mapa: se crea una sola vez y se conserva en el estado,
/// así Leaflet sobrevive a los re-renders completos
pub fn ensure_map_container(state: &AppState) -> Result<Element, JsValue> {
    if let Some(container) = state.map_container.borrow().as_ref() {
        return Ok(container.clone());
    }
    let container = ElementBuilder::new("div")?
        .id(MAP_CONTAINER_ID)?
        .class("map-container")
        .build();
    *state.map_container.borrow_mut() = Some(container.clone());
    Ok(container)
}

pub fn render_location_selector(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let root = ElementBuilder::new("div")?.class("selector").build();

    append_child(&root, &render_network_banner(state)?)?;

    let phase = state.lifecycle.borrow().phase().clone();
    if let MapPhase::Failed(error) = &phase {
        append_child(&root, &render_map_error(state, error)?)?;
    } else {
        let card = ElementBuilder::new("div")?.class("card map-card").build();
        append_child(&card, &text_element("h2", "card-title", &t("mapa_interactivo", &lang))?)?;
        append_child(&card, &text_element("p", "card-subtitle", &t("mapa_instrucciones", &lang))?)?;
        append_child(&card, &render_search(state)?)?;
        append_child(&card, &render_controls(state)?)?;

        let wrapper = ElementBuilder::new("div")?.class("map-wrapper").build();
        append_child(&wrapper, &ensure_map_container(state)?)?;
        if let MapPhase::Loading { progress } = phase {
            append_child(&wrapper, &render_loading(&lang, progress)?)?;
        }
        append_child(&card, &wrapper)?;
        append_child(&root, &card)?;
    }

    append_child(&root, &render_selected(state)?)?;
    append_child(&root, &render_saved(state)?)?;

    Ok(root)
}

/// Banner "Sin conexión" (siempre presente; oculto con `hidden`)
fn render_network_banner(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let banner = ElementBuilder::new("div")?
        .id(NETWORK_BANNER_ID)?
        .class("alert alert-destructive")
        .flag("hidden", state.online())?
        .build();
    append_child(&banner, &text_element("strong", "alert-title", &format!("📴 {}", t("sin_conexion", &lang)))?)?;
    append_child(&banner, &text_element("p", "alert-description", &t("sin_conexion_desc", &lang))?)?;
    Ok(banner)
}

fn render_loading(lang: &str, progress: u8) -> Result<Element, JsValue> {
    let overlay = ElementBuilder::new("div")?
        .id(LOADING_OVERLAY_ID)?
        .class("map-loading")
        .build();
    append_child(&overlay, &text_element("div", "spinner", "")?)?;
    append_child(&overlay, &text_element("p", "map-loading-text", &t("cargando_mapa", lang))?)?;

    let track = ElementBuilder::new("div")?.class("progress").build();
    let bar = ElementBuilder::new("div")?
        .id(PROGRESS_BAR_ID)?
        .class("progress-bar")
        .attr("style", &format!("width: {}%", progress))?
        .build();
    append_child(&track, &bar)?;
    append_child(&overlay, &track)?;

    let text = ElementBuilder::new("p")?
        .id(PROGRESS_TEXT_ID)?
        .class("progress-text")
        .text(&format!("{}%", progress))
        .build();
    append_child(&overlay, &text)?;
    Ok(overlay)
}

fn render_search(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let searching = *state.is_searching.borrow();
    let online = state.online();
    let container = ElementBuilder::new("div")?.class("search").build();

    let row = ElementBuilder::new("div")?.class("search-row").build();
    let input = ElementBuilder::new("input")?
        .id(SEARCH_INPUT_ID)?
        .class("input")
        .attr("type", "search")?
        .attr("placeholder", &t("buscar_placeholder", &lang))?
        .attr("value", &state.search_query.borrow())?
        .flag("disabled", !online)?
        .build();
    {
        let state = state.clone();
        on_input(&input, move |e| {
            if let Some(value) = event_target_value(&e) {
                SearchViewModel::set_query(&state, value);
            }
        })?;
    }
    {
        let state = state.clone();
        on_keydown(&input, move |e| {
            if e.key() == "Enter" {
                e.prevent_default();
                SearchViewModel::search(&state);
            }
        })?;
    }
    append_child(&row, &input)?;

    let label = if searching { t("buscando", &lang) } else { format!("🔍 {}", t("buscar", &lang)) };
    let button = ElementBuilder::new("button")?
        .id(SEARCH_BUTTON_ID)?
        .class("btn btn-primary")
        .text(&label)
        .flag("disabled", searching || !online)?
        .build();
    {
        let state = state.clone();
        on_click(&button, move |_| SearchViewModel::search(&state))?;
    }
    append_child(&row, &button)?;
    append_child(&container, &row)?;

    let results = state.search_results.borrow().clone();
    if !results.is_empty() {
        append_child(&container, &render_results(state, &results)?)?;
    }
    Ok(container)
}

fn render_results(state: &AppState, results: &[SearchResult]) -> Result<Element, JsValue> {
    let list = ElementBuilder::new("ul")?.class("search-results").build();
    for (index, result) in results.iter().enumerate() {
        let item = create_element("li")?;
        let button = ElementBuilder::new("button")?.class("search-result").build();
        append_child(&button, &text_element("span", "search-result-name", &result.display_name)?)?;
        if !result.kind.is_empty() {
            append_child(&button, &text_element("span", "badge", &result.kind)?)?;
        }
        {
            let state = state.clone();
            on_click(&button, move |_| SearchViewModel::select_result(&state, index))?;
        }
        append_child(&item, &button)?;
        append_child(&list, &item)?;
    }
    Ok(list)
}

fn render_controls(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let controls = ElementBuilder::new("div")?.class("map-controls").build();

    // Tipo de mapa
    let layer_label = ElementBuilder::new("label")?
        .class("layer-label")
        .text(&t("tipo_mapa", &lang))
        .build();
    let select = ElementBuilder::new("select")?
        .id("layer-select")?
        .class("select")
        .build();
    let current = *state.map_layer.borrow();
    for layer in MapLayer::ALL {
        let option = ElementBuilder::new("option")?
            .attr("value", layer.key())?
            .text(&t(layer.label_key(), &lang))
            .flag("selected", layer == current)?
            .build();
        append_child(&select, &option)?;
    }
    {
        let state = state.clone();
        on_change(&select, move |e| {
            if let Some(key) = event_target_value(&e) {
                MapViewModel::change_layer(&state, &key);
            }
        })?;
    }
    append_child(&layer_label, &select)?;
    append_child(&controls, &layer_label)?;

    let locating = *state.locating.borrow();
    let locate_text = if locating { t("localizando", &lang) } else { t("mi_ubicacion", &lang) };
    let locate = ElementBuilder::new("button")?
        .id(LOCATE_BUTTON_ID)?
        .class("btn btn-outline")
        .text(&locate_text)
        .flag("disabled", locating || !state.has_map() || !state.online())?
        .build();
    {
        let state = state.clone();
        on_click(&locate, move |_| MapViewModel::use_current_location(&state))?;
    }
    append_child(&controls, &locate)?;

    let save = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .text(&t("guardar", &lang))
        .flag("disabled", state.selected_location.borrow().is_none())?
        .build();
    {
        let state = state.clone();
        on_click(&save, move |_| SavedLocationsViewModel::save_current(&state))?;
    }
    append_child(&controls, &save)?;

    Ok(controls)
}

fn render_selected(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let card = ElementBuilder::new("div")?.class("card selected-card").build();
    append_child(&card, &text_element("h3", "card-title", &format!("📍 {}", t("ubicacion_seleccionada", &lang)))?)?;

    match state.selected_location.borrow().as_ref() {
        Some(location) => {
            let grid = ElementBuilder::new("dl")?.class("location-details").build();
            append_field(&grid, &t("latitud", &lang), &format!("{:.6}", location.lat))?;
            append_field(&grid, &t("longitud", &lang), &format!("{:.6}", location.lng))?;
            append_field(&grid, &t("direccion", &lang), &location.address)?;
            append_field(&grid, &t("seleccionada", &lang), &local_timestamp(&location.timestamp))?;
            append_child(&card, &grid)?;
        }
        None => {
            append_child(&card, &text_element("p", "muted", &t("ninguna_seleccion", &lang))?)?;
        }
    }
    Ok(card)
}

fn append_field(parent: &Element, label: &str, value: &str) -> Result<(), JsValue> {
    append_child(parent, &text_element("dt", "field-label", label)?)?;
    append_child(parent, &text_element("dd", "field-value", value)?)
}

fn render_saved(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let saved = state.saved_locations.borrow().clone();
    let card = ElementBuilder::new("div")?.class("card saved-card").build();
    append_child(
        &card,
        &text_element("h3", "card-title", &format!("💾 {} ({})", t("ubicaciones_guardadas", &lang), saved.len()))?,
    )?;

    if saved.is_empty() {
        append_child(&card, &text_element("p", "muted", &t("sin_guardadas", &lang))?)?;
        return Ok(card);
    }

    let list = ElementBuilder::new("ul")?.class("saved-list").build();
    for (index, location) in saved.iter().enumerate() {
        append_child(&list, &render_saved_item(state, &lang, index, location)?)?;
    }
    append_child(&card, &list)?;
    Ok(card)
}

fn render_saved_item(
    state: &AppState,
    lang: &str,
    index: usize,
    location: &LocationData,
) -> Result<Element, JsValue> {
    let item = ElementBuilder::new("li")?.class("saved-item").build();

    let info = ElementBuilder::new("div")?.class("saved-info").build();
    append_child(&info, &text_element("p", "saved-address", &location.address)?)?;
    append_child(&info, &text_element("p", "saved-coords", &location.coordinates().format_fixed())?)?;
    append_child(&item, &info)?;

    let actions = ElementBuilder::new("div")?.class("saved-actions").build();
    let load = ElementBuilder::new("button")?
        .class("btn btn-outline btn-sm")
        .text(&t("cargar", lang))
        .build();
    {
        let state = state.clone();
        on_click(&load, move |_| SavedLocationsViewModel::load(&state, index))?;
    }
    let delete = ElementBuilder::new("button")?
        .class("btn btn-destructive btn-sm")
        .text(&t("eliminar", lang))
        .build();
    set_attribute(&delete, "aria-label", &format!("{} {}", t("eliminar", lang), location.address))?;
    {
        let state = state.clone();
        on_click(&delete, move |_| SavedLocationsViewModel::delete(&state, index))?;
    }
    append_child(&actions, &load)?;
    append_child(&actions, &delete)?;
    append_child(&item, &actions)?;

    Ok(item)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn state() -> AppState {
        AppState::with_preferences("ES".to_string(), MapLayer::Osm, true)
    }

    #[wasm_bindgen_test]
    fn map_container_survives_rerenders() {
        let state = state();
        let first = ensure_map_container(&state).unwrap();
        let second = ensure_map_container(&state).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id(), MAP_CONTAINER_ID);
    }

    #[wasm_bindgen_test]
    fn loading_view_shows_progress() {
        let state = state();
        state.lifecycle.borrow_mut().set_progress(50);
        let view = render_location_selector(&state).unwrap();
        let bar = view.query_selector(&format!("#{}", PROGRESS_BAR_ID)).unwrap().unwrap();
        assert_eq!(bar.get_attribute("style").as_deref(), Some("width: 50%"));
        let banner = view.query_selector(&format!("#{}", NETWORK_BANNER_ID)).unwrap().unwrap();
        assert!(banner.has_attribute("hidden"));
    }

    #[wasm_bindgen_test]
    fn failed_view_shows_retry() {
        let state = state();
        state.lifecycle.borrow_mut().fail(crate::models::MapError::offline());
        let view = render_location_selector(&state).unwrap();
        assert!(view.query_selector("#map-retry").unwrap().is_some());
        assert!(view.query_selector(".map-container").unwrap().is_none());
    }

    fn is_disabled(view: &Element, id: &str) -> bool {
        view.query_selector(&format!("#{}", id))
            .unwrap()
            .unwrap()
            .has_attribute("disabled")
    }

    #[wasm_bindgen_test]
    fn offline_disables_search_and_locate() {
        let online = state();
        let view = render_location_selector(&online).unwrap();
        assert!(!is_disabled(&view, SEARCH_INPUT_ID));
        assert!(!is_disabled(&view, SEARCH_BUTTON_ID));

        let offline = AppState::with_preferences("ES".to_string(), MapLayer::Osm, false);
        let view = render_location_selector(&offline).unwrap();
        assert!(is_disabled(&view, SEARCH_INPUT_ID));
        assert!(is_disabled(&view, SEARCH_BUTTON_ID));
        assert!(is_disabled(&view, LOCATE_BUTTON_ID));
        let banner = view.query_selector(&format!("#{}", NETWORK_BANNER_ID)).unwrap().unwrap();
        assert!(!banner.has_attribute("hidden"));
    }

    #[wasm_bindgen_test]
    fn selected_card_shows_selection_time() {
        let state = state();
        let mut location = LocationData::new(crate::models::Coordinates::new(40.4168, -3.7038), "Madrid");
        location.timestamp = "2024-05-01T10:30:00.000Z".to_string();
        *state.selected_location.borrow_mut() = Some(location);

        let view = render_location_selector(&state).unwrap();
        let card = view.query_selector(".selected-card").unwrap().unwrap();
        let text = card.text_content().unwrap_or_default();
        assert!(text.contains("Seleccionada"), "{}", text);
        assert!(text.contains("2024"), "{}", text);
        assert!(!text.contains("2024-05-01T10:30:00.000Z"), "{}", text);
    }
}
