// ============================================================================
// LEAFLET LOADER - Inyección de CSS + JS de Leaflet en <head>
// ============================================================================

use std::fmt;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

use crate::config::CONFIG;
use crate::dom::{create_element, document, get_element_by_id, set_attribute};
use crate::utils::leaflet_ffi::is_leaflet_available;
use crate::utils::{
    LEAFLET_CSS_INTEGRITY, LEAFLET_CSS_URL, LEAFLET_JS_INTEGRITY, LEAFLET_JS_URL, LEAFLET_SETTLE_MS,
};

const CSS_ELEMENT_ID: &str = "leaflet-css";
const JS_ELEMENT_ID: &str = "leaflet-js";
const TIMEOUT_MARK: &str = "leaflet-timeout";

#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    Css(String),
    Script(String),
    Timeout,
    /// El script cargó pero `window.L` no apareció
    NotAvailable,
    Dom(String),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Css(e) => write!(f, "Error cargando Leaflet CSS: {}", e),
            LoaderError::Script(e) => write!(f, "Error cargando Leaflet JS: {}", e),
            LoaderError::Timeout => write!(f, "Timeout cargando Leaflet"),
            LoaderError::NotAvailable => write!(f, "Leaflet no está disponible"),
            LoaderError::Dom(e) => write!(f, "Error manipulando el DOM: {}", e),
        }
    }
}

impl std::error::Error for LoaderError {}

pub struct LeafletLoader;

impl LeafletLoader {
    pub fn is_loaded() -> bool {
        is_leaflet_available()
    }

    /// Carga Leaflet si hace falta, informando el progreso (10 → 50 → 100)
    pub async fn load<F>(on_progress: F) -> Result<(), LoaderError>
    where
        F: Fn(u8),
    {
        if Self::is_loaded() {
            log::info!("📦 [LEAFLET] Ya estaba cargado");
            on_progress(100);
            return Ok(());
        }

        on_progress(10);

        let css = Self::inject(
            "link",
            CSS_ELEMENT_ID,
            &[
                ("rel", "stylesheet"),
                ("href", LEAFLET_CSS_URL),
                ("integrity", LEAFLET_CSS_INTEGRITY),
                ("crossorigin", ""),
            ],
        )?;
        wait_for_load(&css)
            .await
            .map_err(|e| LoaderError::Css(describe(&e)))?;
        log::info!("🎨 [LEAFLET] CSS cargado");
        on_progress(50);

        let script = Self::inject(
            "script",
            JS_ELEMENT_ID,
            &[
                ("src", LEAFLET_JS_URL),
                ("integrity", LEAFLET_JS_INTEGRITY),
                ("crossorigin", ""),
            ],
        )?;
        let timeout_ms = CONFIG.map_config.leaflet_timeout_ms;
        match wait_for_load_with_timeout(&script, timeout_ms).await {
            Ok(()) => {}
            Err(e) if e.as_string().as_deref() == Some(TIMEOUT_MARK) => {
                if !Self::is_loaded() {
                    return Err(LoaderError::Timeout);
                }
            }
            Err(e) => return Err(LoaderError::Script(describe(&e))),
        }
        on_progress(100);

        TimeoutFuture::new(LEAFLET_SETTLE_MS).await;

        if Self::is_loaded() {
            log::info!("✅ [LEAFLET] Biblioteca disponible");
            Ok(())
        } else {
            Err(LoaderError::NotAvailable)
        }
    }

    /// Crea el elemento en <head>, reemplazando uno anterior (reintentos)
    fn inject(tag: &str, id: &str, attrs: &[(&str, &str)]) -> Result<HtmlElement, LoaderError> {
        let dom_err = |e: JsValue| LoaderError::Dom(describe(&e));

        if let Some(previous) = get_element_by_id(id) {
            previous.remove();
        }

        let element = create_element(tag).map_err(dom_err)?;
        set_attribute(&element, "id", id).map_err(dom_err)?;
        for (name, value) in attrs {
            set_attribute(&element, name, value).map_err(dom_err)?;
        }

        let head = document()
            .and_then(|d| d.head())
            .ok_or_else(|| LoaderError::Dom("No hay <head>".to_string()))?;
        head.append_child(&element).map_err(dom_err)?;

        element
            .dyn_into::<HtmlElement>()
            .map_err(|_| LoaderError::Dom("El elemento no es HtmlElement".to_string()))
    }

    /// El script es descargable (sin ejecutarlo); usado por el diagnóstico
    pub async fn probe() -> Result<(), String> {
        let response = Request::get(LEAFLET_JS_URL)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if response.ok() {
            Ok(())
        } else {
            Err(format!("HTTP {}", response.status()))
        }
    }
}

/// Promesa que resuelve con `onload` y rechaza con `onerror`
fn load_promise(element: &HtmlElement) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, reject| {
        element.set_onload(Some(&resolve));
        element.set_onerror(Some(&reject));
    })
}

async fn wait_for_load(element: &HtmlElement) -> Result<(), JsValue> {
    JsFuture::from(load_promise(element)).await.map(|_| ())
}

async fn wait_for_load_with_timeout(element: &HtmlElement, timeout_ms: u32) -> Result<(), JsValue> {
    let timeout = js_sys::Promise::new(&mut |_resolve, reject| {
        Timeout::new(timeout_ms, move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(TIMEOUT_MARK));
        })
        .forget();
    });
    let raced = js_sys::Promise::race(&js_sys::Array::of2(&load_promise(element), &timeout));
    JsFuture::from(raced).await.map(|_| ())
}

/// Texto legible de un error JS (los `Event` de error no traen mensaje)
fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(event) = value.dyn_ref::<web_sys::Event>() {
        return format!("evento {}", event.type_());
    }
    format!("{:?}", value)
}
