// ============================================================================
// DIAGNOSTICS VIEW - Panel de pruebas y guía de solución de problemas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, set_flag, text_element, ElementBuilder};
use crate::models::{DiagnosticResult, DiagnosticStatus, OverallStatus};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::DiagnosticsViewModel;
use crate::views::map_error::local_time;

pub const DIAGNOSTIC_RESULTS_ID: &str = "diagnostic-results";
pub const DIAGNOSTIC_SUMMARY_ID: &str = "diagnostic-summary";

const GUIDE_SECTIONS: [&str; 4] = [
    "guia_conectividad",
    "guia_biblioteca",
    "guia_api",
    "guia_geolocalizacion",
];

pub fn render_diagnostics(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.lang();
    let running = *state.diagnostics_running.borrow();
    let page = ElementBuilder::new("div")?.class("diagnostics").build();

    // Cabecera + botón
    let header = ElementBuilder::new("div")?.class("card").build();
    append_child(&header, &text_element("h2", "card-title", &format!("🩺 {}", t("diag_titulo", &lang)))?)?;
    append_child(&header, &text_element("p", "card-subtitle", &t("diag_subtitulo", &lang))?)?;
    append_child(&header, &text_element("p", "muted", &t("diag_descripcion", &lang))?)?;

    let label = if running { t("diag_ejecutando", &lang) } else { t("diag_ejecutar", &lang) };
    let run = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .text(&label)
        .flag("disabled", running)?
        .build();
    {
        let state = state.clone();
        on_click(&run, move |_| DiagnosticsViewModel::run_all(&state))?;
    }
    append_child(&header, &run)?;
    append_child(&page, &header)?;

    let summary = ElementBuilder::new("div")?.id(DIAGNOSTIC_SUMMARY_ID)?.build();
    let results = ElementBuilder::new("div")?
        .id(DIAGNOSTIC_RESULTS_ID)?
        .class("card diagnostic-results")
        .build();
    fill_diagnostics(&summary, &results, state)?;
    append_child(&page, &summary)?;
    append_child(&page, &results)?;

    append_child(&page, &render_guide(&lang)?)?;
    Ok(page)
}

/// Rellena resumen y lista (también usado por la actualización incremental)
pub fn fill_diagnostics(summary: &Element, results: &Element, state: &AppState) -> Result<(), JsValue> {
    let lang = state.lang();
    let items = state.diagnostics.borrow().clone();

    if let Some(alert) = render_overall(&lang, OverallStatus::from_results(&items))? {
        append_child(summary, &alert)?;
    }

    set_flag(results, "hidden", items.is_empty())?;
    if items.is_empty() {
        return Ok(());
    }

    append_child(results, &text_element("h3", "card-title", &t("diag_resultados", &lang))?)?;
    let list = ElementBuilder::new("ul")?.class("diagnostic-list").build();
    for result in &items {
        append_child(&list, &render_result(&lang, result)?)?;
    }
    append_child(results, &list)?;
    Ok(())
}

fn render_overall(lang: &str, overall: OverallStatus) -> Result<Option<Element>, JsValue> {
    let (class, title, description) = match overall {
        OverallStatus::Unknown => return Ok(None),
        OverallStatus::Error => ("alert alert-destructive", "diag_problemas", "diag_problemas_desc"),
        OverallStatus::Warning => ("alert alert-warning", "diag_advertencias", "diag_advertencias_desc"),
        OverallStatus::Success => ("alert alert-success", "diag_completado", "diag_completado_desc"),
    };
    let alert = ElementBuilder::new("div")?
        .class(class)
        .attr("role", "status")?
        .build();
    append_child(&alert, &text_element("strong", "alert-title", &t(title, lang))?)?;
    append_child(&alert, &text_element("p", "alert-description", &t(description, lang))?)?;
    Ok(Some(alert))
}

fn status_presentation(status: DiagnosticStatus) -> (&'static str, &'static str, &'static str) {
    match status {
        DiagnosticStatus::Success => ("✅", "badge badge-success", "estado_exitoso"),
        DiagnosticStatus::Error => ("❌", "badge badge-destructive", "estado_error"),
        DiagnosticStatus::Warning => ("⚠️", "badge badge-warning", "estado_advertencia"),
        DiagnosticStatus::Loading => ("⏳", "badge", "estado_cargando"),
    }
}

fn render_result(lang: &str, result: &DiagnosticResult) -> Result<Element, JsValue> {
    let (icon, badge_class, badge_key) = status_presentation(result.status);
    let item = ElementBuilder::new("li")?.class("diagnostic-item").build();

    let head = ElementBuilder::new("div")?.class("diagnostic-head").build();
    append_child(&head, &text_element("span", "diagnostic-icon", icon)?)?;
    append_child(&head, &text_element("span", "diagnostic-name", &result.test)?)?;
    append_child(&head, &text_element("span", badge_class, &t(badge_key, lang))?)?;
    append_child(&item, &head)?;

    append_child(&item, &text_element("p", "diagnostic-message", &result.message)?)?;
    if let Some(details) = &result.details {
        append_child(&item, &text_element("p", "diagnostic-details", details)?)?;
    }
    append_child(&item, &text_element("p", "diagnostic-time", &local_time(&result.timestamp))?)?;
    Ok(item)
}

fn render_guide(lang: &str) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("card guide").build();
    append_child(&card, &text_element("h3", "card-title", &t("guia_titulo", lang))?)?;

    for section in GUIDE_SECTIONS {
        let block = ElementBuilder::new("div")?.class("guide-section").build();
        append_child(&block, &text_element("h4", "guide-title", &t(section, lang))?)?;
        let list = ElementBuilder::new("ul")?.class("guide-list").build();
        for n in 1..=4 {
            let key = format!("{}_{}", section, n);
            append_child(&list, &text_element("li", "", &t(&key, lang))?)?;
        }
        append_child(&block, &list)?;
        append_child(&card, &block)?;
    }
    Ok(card)
}
