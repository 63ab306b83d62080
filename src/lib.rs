// ============================================================================
// SELECTOR DE UBICACIÓN - FRONTEND MVVM (RUST PURO + LEAFLET)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Lógica UI sobre el estado compartido
// - Services: Leaflet, Nominatim, geolocalización, localStorage, diagnóstico
// - Maps: Mapa Leaflet detrás del trait MapRenderer
// - State: State Management con Rc<RefCell>
// ============================================================================

mod config;
mod models;
mod services;
mod maps;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod app;

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::state::app_state::{AppState, Route, UpdateType};

// Instancia global de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Debug con logging activado, Warn en otro caso
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Selector de Ubicación - Rust + Leaflet ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Navegación por hash (#/ ↔ #/diagnostico). Listener global: se registra una vez.
    if let Some(win) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            let route = Route::from_hash(&crate::dom::location_hash());
            log::info!("🧭 [ROUTE] {:?}", route);
            if let Some(state) = current_state() {
                *state.route.borrow_mut() = route;
            }
            rerender_app();
        }) as Box<dyn FnMut(web_sys::Event)>);

        win.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn current_state() -> Option<AppState> {
    APP.with(|app_cell| app_cell.borrow().as_ref().map(|app| app.state().clone()))
}

/// Re-render completo
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Actualizar la app con el tipo de actualización indicado
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        let needs_full_render = match update_type {
            UpdateType::FullRender => true,
            UpdateType::Incremental(inc_type) => match app_cell.borrow().as_ref() {
                Some(app) => match app.update_incremental(inc_type) {
                    Ok(()) => false,
                    Err(e) => {
                        let error_str = format!("{:?}", e);
                        if error_str.contains("needs full render") {
                            log::debug!("🔄 [UPDATE] {:?} → re-render completo", inc_type);
                            true
                        } else {
                            log::error!("❌ [UPDATE] Error en actualización incremental: {}", error_str);
                            false
                        }
                    }
                },
                None => {
                    log::warn!("⚠️ [UPDATE] App no está inicializada");
                    false
                }
            },
        };

        if !needs_full_render {
            return;
        }

        // Un render puede coincidir con otro en curso (borrow ocupado): se omite
        match app_cell.try_borrow_mut() {
            Ok(mut app) => {
                if let Some(app) = app.as_mut() {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                    }
                }
            }
            Err(_) => log::warn!("⚠️ [RERENDER] Render en curso, se omite"),
        }
    });
}

/// Cambiar la capa base desde JavaScript (`osm`, `satellite`, `topo`)
#[wasm_bindgen]
pub fn change_map_layer(key: &str) {
    match current_state() {
        Some(state) => viewmodels::MapViewModel::change_layer(&state, key),
        None => log::warn!("⚠️ [MAP] App no está inicializada"),
    }
}

/// Re-render completo llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
