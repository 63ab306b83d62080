// ============================================================================
// APP VIEW - Cabecera, vista de la ruta actual y región de toasts
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, event_target_value, on_change, text_element, ElementBuilder};
use crate::state::app_state::{AppState, Route};
use crate::utils::i18n::{t, SUPPORTED_LANGUAGES};
use crate::views::diagnostics::render_diagnostics;
use crate::views::location_selector::render_location_selector;
use crate::views::toasts::render_toasts;

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let route = *state.route.borrow();
    let app = ElementBuilder::new("div")?.class("app").build();

    append_child(&app, &render_header(state, route)?)?;

    let main = ElementBuilder::new("main")?.class("app-main").build();
    let body = match route {
        Route::Selector => render_location_selector(state)?,
        Route::Diagnostics => render_diagnostics(state)?,
    };
    append_child(&main, &body)?;
    append_child(&app, &main)?;

    append_child(&app, &render_toasts(state)?)?;
    Ok(app)
}

fn render_header(state: &AppState, route: Route) -> Result<Element, JsValue> {
    let lang = state.lang();
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let titles = ElementBuilder::new("div")?.class("app-titles").build();
    append_child(&titles, &text_element("h1", "app-title", &t("app_titulo", &lang))?)?;
    append_child(&titles, &text_element("p", "app-subtitle", &t("app_subtitulo", &lang))?)?;
    append_child(&titles, &text_element("p", "powered-by", &t("powered_by", &lang))?)?;
    append_child(&header, &titles)?;

    let nav = ElementBuilder::new("nav")?.class("app-nav").build();
    let (href, label) = match route {
        Route::Selector => (Route::Diagnostics.hash(), t("nav_diagnostico", &lang)),
        Route::Diagnostics => (Route::Selector.hash(), t("nav_volver", &lang)),
    };
    let link = ElementBuilder::new("a")?
        .class("btn btn-outline")
        .attr("href", href)?
        .text(&label)
        .build();
    append_child(&nav, &link)?;

    // Selector de idioma
    let select = ElementBuilder::new("select")?
        .class("select language-select")
        .attr("aria-label", &t("idioma", &lang))?
        .build();
    for code in SUPPORTED_LANGUAGES {
        let option = ElementBuilder::new("option")?
            .attr("value", code)?
            .text(code)
            .flag("selected", code == lang)?
            .build();
        append_child(&select, &option)?;
    }
    {
        let state = state.clone();
        on_change(&select, move |e| {
            if let Some(code) = event_target_value(&e) {
                log::info!("🌐 [I18N] Idioma: {}", code);
                state.set_language(&code);
                state.notify_subscribers();
            }
        })?;
    }
    append_child(&nav, &select)?;
    append_child(&header, &nav)?;

    Ok(header)
}
