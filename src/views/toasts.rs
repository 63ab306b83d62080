// ============================================================================
// TOASTS VIEW - Región de notificaciones
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, text_element, ElementBuilder};
use crate::models::Toast;
use crate::state::app_state::AppState;
use crate::viewmodels::ToastViewModel;

pub const TOAST_REGION_ID: &str = "toast-region";

pub fn render_toasts(state: &AppState) -> Result<Element, JsValue> {
    let region = ElementBuilder::new("div")?
        .id(TOAST_REGION_ID)?
        .class("toast-region")
        .attr("aria-live", "polite")?
        .build();

    fill_toasts(&region, state)?;
    Ok(region)
}

/// Rellena la región (también usado por la actualización incremental)
pub fn fill_toasts(region: &Element, state: &AppState) -> Result<(), JsValue> {
    let toasts = state.toasts.borrow().clone();
    for toast in &toasts {
        append_child(region, &render_toast(state, toast)?)?;
    }
    Ok(())
}

fn render_toast(state: &AppState, toast: &Toast) -> Result<Element, JsValue> {
    let class = if toast.is_destructive() {
        "toast toast-destructive"
    } else {
        "toast"
    };
    let item = ElementBuilder::new("div")?
        .class(class)
        .attr("role", "status")?
        .build();

    let body = ElementBuilder::new("div")?.class("toast-body").build();
    append_child(&body, &text_element("div", "toast-title", &toast.title)?)?;
    if !toast.description.is_empty() {
        append_child(&body, &text_element("div", "toast-description", &toast.description)?)?;
    }
    append_child(&item, &body)?;

    let close = ElementBuilder::new("button")?
        .class("toast-close")
        .attr("aria-label", "Cerrar")?
        .text("✕")
        .build();
    {
        let state = state.clone();
        let id = toast.id;
        on_click(&close, move |_| ToastViewModel::dismiss(&state, id))?;
    }
    append_child(&item, &close)?;

    Ok(item)
}
