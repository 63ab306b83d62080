use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::MapConfig;
use crate::models::{Coordinates, MapLayer};
use crate::utils::leaflet_ffi::{
    create_div_icon, create_map, create_marker, create_tile_layer, is_leaflet_available, lat_lng,
    read_lat_lng, to_js_options, DivIconOptions, LeafletMapHandle, MapOptions, MarkerHandle,
    TileLayerHandle, TileLayerOptions,
};

use super::{MapHandlers, MapRenderer};

const MARKER_HTML: &str = r#"<div class="marker-pin"><div class="marker-dot"></div></div>"#;

/// Renderizador de mapas para web usando Leaflet
pub struct LeafletMap {
    map: LeafletMapHandle,
    marker: MarkerHandle,
    layers: HashMap<MapLayer, TileLayerHandle>,
    current_layer: MapLayer,
    ready: bool,
    // Los listeners viven lo mismo que el mapa
    _listeners: Vec<Closure<dyn FnMut(JsValue)>>,
}

fn js_err(context: &str, e: JsValue) -> String {
    let detail = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    format!("{}: {}", context, detail)
}

impl LeafletMap {
    /// Crear el mapa en `container` con la capa `layer` activa
    pub fn create(
        container: &HtmlElement,
        config: &MapConfig,
        layer: MapLayer,
        handlers: MapHandlers,
    ) -> Result<Self, String> {
        if !is_leaflet_available() {
            return Err("Leaflet no está disponible".to_string());
        }

        log::info!("🗺️ [MAP] Inicializando Leaflet...");

        let center = config.center();
        let options = to_js_options(&MapOptions {
            center: [center.lat, center.lng],
            zoom: config.default_zoom,
            zoom_control: true,
            attribution_control: true,
            prefer_canvas: true,
            max_zoom: config.max_zoom,
            min_zoom: config.min_zoom,
        })
        .map_err(|e| js_err("Opciones del mapa", e))?;
        let map = create_map(container, &options).map_err(|e| js_err("L.map", e))?;

        let mut listeners: Vec<Closure<dyn FnMut(JsValue)>> = Vec::new();
        let mut layers = HashMap::new();
        for candidate in MapLayer::ALL {
            let tile_layer = Self::build_tile_layer(candidate, &mut listeners)?;
            layers.insert(candidate, tile_layer);
        }
        if let Some(initial) = layers.get(&layer) {
            initial.add_to(&map);
        }

        let marker = Self::build_marker(config.marker_start())?;
        marker.add_to(&map);

        // Clic en el mapa → coordenadas del evento
        let on_click = handlers.on_click.clone();
        let click = Closure::wrap(Box::new(move |event: JsValue| {
            let latlng = js_sys::Reflect::get(&event, &"latlng".into()).unwrap_or(JsValue::UNDEFINED);
            match read_lat_lng(&latlng) {
                Some(coords) => on_click(coords),
                None => log::error!("❌ [MAP] Evento click sin latlng"),
            }
        }) as Box<dyn FnMut(JsValue)>);
        map.on("click", click.as_ref().unchecked_ref());
        listeners.push(click);

        // Fin de arrastre → posición final del marcador
        let on_drag = handlers.on_marker_drag.clone();
        let dragged = marker.clone();
        let dragend = Closure::wrap(Box::new(move |_event: JsValue| {
            match read_lat_lng(&dragged.get_lat_lng()) {
                Some(coords) => on_drag(coords),
                None => log::error!("❌ [MAP] No se pudo leer la posición del marcador"),
            }
        }) as Box<dyn FnMut(JsValue)>);
        marker.on("dragend", dragend.as_ref().unchecked_ref());
        listeners.push(dragend);

        log::info!("✅ [MAP] Mapa creado (capa {})", layer.key());

        Ok(Self {
            map,
            marker,
            layers,
            current_layer: layer,
            ready: true,
            _listeners: listeners,
        })
    }

    fn build_tile_layer(
        layer: MapLayer,
        listeners: &mut Vec<Closure<dyn FnMut(JsValue)>>,
    ) -> Result<TileLayerHandle, String> {
        let options = to_js_options(&TileLayerOptions {
            attribution: layer.attribution().to_string(),
            max_zoom: layer.max_zoom(),
            error_tile_url: layer.error_tile().to_string(),
        })
        .map_err(|e| js_err("Opciones de capa", e))?;
        let tile_layer = create_tile_layer(layer.tile_url(), &options)
            .map_err(|e| js_err("L.tileLayer", e))?;

        let key = layer.key();
        let on_error = Closure::wrap(Box::new(move |event: JsValue| {
            log::warn!("⚠️ [MAP] Error cargando tile ({}): {:?}", key, event);
        }) as Box<dyn FnMut(JsValue)>);
        tile_layer.on("tileerror", on_error.as_ref().unchecked_ref());
        listeners.push(on_error);

        Ok(tile_layer)
    }

    fn build_marker(start: Coordinates) -> Result<MarkerHandle, String> {
        let icon_options = to_js_options(&DivIconOptions {
            class_name: "custom-marker".to_string(),
            html: MARKER_HTML.to_string(),
            icon_size: [32, 32],
            icon_anchor: [16, 16],
        })
        .map_err(|e| js_err("Opciones del icono", e))?;
        let icon = create_div_icon(&icon_options).map_err(|e| js_err("L.divIcon", e))?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"draggable".into(), &JsValue::TRUE)
            .and_then(|_| js_sys::Reflect::set(&options, &"icon".into(), &icon))
            .map_err(|e| js_err("Opciones del marcador", e))?;

        create_marker(&lat_lng(start), &options).map_err(|e| js_err("L.marker", e))
    }

    fn ensure_ready(&self) -> Result<(), String> {
        if self.ready {
            Ok(())
        } else {
            Err("Map is not ready".to_string())
        }
    }

    pub fn current_layer(&self) -> MapLayer {
        self.current_layer
    }
}

impl MapRenderer for LeafletMap {
    fn set_marker(&mut self, coordinates: Coordinates) -> Result<(), String> {
        self.ensure_ready()?;
        self.marker.set_lat_lng(&lat_lng(coordinates));
        Ok(())
    }

    fn pan_to(&mut self, coordinates: Coordinates) -> Result<(), String> {
        self.ensure_ready()?;
        self.map
            .pan_to(&lat_lng(coordinates))
            .map_err(|e| js_err("panTo", e))
    }

    fn set_view(&mut self, coordinates: Coordinates, zoom: f64) -> Result<(), String> {
        self.ensure_ready()?;
        log::info!("🎯 [MAP] Centrando en {} con zoom {}", coordinates, zoom);
        self.map
            .set_view(&lat_lng(coordinates), zoom)
            .map_err(|e| js_err("setView", e))
    }

    fn switch_layer(&mut self, layer: MapLayer) -> Result<(), String> {
        self.ensure_ready()?;
        let tile_layer = self
            .layers
            .get(&layer)
            .ok_or_else(|| format!("Capa desconocida: {}", layer.key()))?;

        // Quitar todo menos el marcador
        let map = self.map.clone();
        let marker: JsValue = self.marker.clone().into();
        let remover = Closure::wrap(Box::new(move |candidate: JsValue| {
            if candidate != marker {
                map.remove_layer(&candidate);
            }
        }) as Box<dyn FnMut(JsValue)>);
        self.map.each_layer(remover.as_ref().unchecked_ref());

        tile_layer.add_to(&self.map);
        self.current_layer = layer;
        log::info!("🗺️ [MAP] Capa cambiada a {}", layer.key());
        Ok(())
    }

    fn invalidate_size(&self) {
        if self.ready {
            self.map.invalidate_size();
        }
    }

    fn destroy(&mut self) {
        if !self.ready {
            return;
        }
        self.ready = false;
        if let Err(e) = self.map.remove() {
            log::warn!("⚠️ [MAP] Error destruyendo el mapa: {:?}", e);
        }
        log::info!("🧹 [MAP] Mapa destruido");
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Drop for LeafletMap {
    fn drop(&mut self) {
        self.destroy();
    }
}
