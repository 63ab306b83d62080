// ============================================================================
// LEAFLET FFI - Bindings a la API global `L` de Leaflet
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica.
// `L` se inyecta en runtime (ver LeafletLoader): las llamadas resuelven `L`
// en el momento de ejecutarse, nunca al instanciar el módulo WASM.
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use crate::models::Coordinates;

#[wasm_bindgen]
extern "C" {
    /// Instancia de `L.Map`
    #[derive(Debug, Clone)]
    pub type LeafletMapHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container: &HtmlElement, options: &JsValue) -> Result<LeafletMapHandle, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setView)]
    pub fn set_view(this: &LeafletMapHandle, center: &JsValue, zoom: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = panTo)]
    pub fn pan_to(this: &LeafletMapHandle, center: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn remove(this: &LeafletMapHandle) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &LeafletMapHandle);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &LeafletMapHandle, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = eachLayer)]
    pub fn each_layer(this: &LeafletMapHandle, callback: &js_sys::Function);

    #[wasm_bindgen(method, js_name = removeLayer)]
    pub fn remove_layer(this: &LeafletMapHandle, layer: &JsValue);

    /// Instancia de `L.TileLayer`
    #[derive(Debug, Clone)]
    pub type TileLayerHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    pub fn create_tile_layer(url: &str, options: &JsValue) -> Result<TileLayerHandle, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &TileLayerHandle, map: &LeafletMapHandle);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &TileLayerHandle, event: &str, handler: &js_sys::Function);

    /// Instancia de `L.Marker`
    #[derive(Debug, Clone)]
    pub type MarkerHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    pub fn create_marker(lat_lng: &JsValue, options: &JsValue) -> Result<MarkerHandle, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &MarkerHandle, map: &LeafletMapHandle);

    #[wasm_bindgen(method, js_name = setLatLng)]
    pub fn set_lat_lng(this: &MarkerHandle, lat_lng: &JsValue);

    #[wasm_bindgen(method, js_name = getLatLng)]
    pub fn get_lat_lng(this: &MarkerHandle) -> JsValue;

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &MarkerHandle, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    pub fn create_div_icon(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Opciones de `L.map`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: [f64; 2],
    pub zoom: f64,
    pub zoom_control: bool,
    pub attribution_control: bool,
    pub prefer_canvas: bool,
    pub max_zoom: f64,
    pub min_zoom: f64,
}

/// Opciones de `L.tileLayer`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerOptions {
    pub attribution: String,
    pub max_zoom: u8,
    pub error_tile_url: String,
}

/// Opciones de `L.divIcon`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivIconOptions {
    pub class_name: String,
    pub html: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [u32; 2],
}

/// Convierte un struct de opciones a objeto JS plano
pub fn to_js_options<T: Serialize>(options: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `[lat, lng]` como array JS (formato aceptado por Leaflet)
pub fn lat_lng(coords: Coordinates) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(coords.lat));
    array.push(&JsValue::from_f64(coords.lng));
    array.into()
}

/// Lee un `L.LatLng` (objeto con `lat` y `lng`)
pub fn read_lat_lng(value: &JsValue) -> Option<Coordinates> {
    let lat = js_sys::Reflect::get(value, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(value, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Some(Coordinates::new(lat, lng))
}

/// Objeto global `window.L`, si Leaflet ya está cargado
fn leaflet_global() -> Option<JsValue> {
    let window = web_sys::window()?;
    let l = js_sys::Reflect::get(&window, &JsValue::from_str("L")).ok()?;
    if l.is_undefined() || l.is_null() {
        None
    } else {
        Some(l)
    }
}

/// ¿Está `window.L` disponible?
pub fn is_leaflet_available() -> bool {
    leaflet_global().is_some()
}

/// `L.version`
pub fn leaflet_version() -> Option<String> {
    let l = leaflet_global()?;
    js_sys::Reflect::get(&l, &JsValue::from_str("version")).ok()?.as_string()
}
