// ============================================================================
// APP - Aplicación principal
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::incremental::{update_diagnostics, update_loading_progress, update_network_banner, update_toasts};
use crate::dom::{append_child, clear_children, get_element_by_id, location_hash};
use crate::services::network_monitor::NetworkMonitor;
use crate::state::app_state::{AppState, IncrementalUpdate, Route};
use crate::viewmodels::{MapViewModel, SavedLocationsViewModel};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
    // Mantiene vivo el estado de red mientras viva la app
    _network: NetworkMonitor,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();
        *state.route.borrow_mut() = Route::from_hash(&location_hash());

        SavedLocationsViewModel::load_on_start(&state);

        let network = NetworkMonitor::new();
        {
            let state = state.clone();
            network.start_monitoring(move |status| MapViewModel::handle_network_change(&state, status));
        }

        // Suscribirse a cambios de estado; Timeout(0) agrupa varios cambios seguidos
        state.subscribe_to_changes(move |update_type| {
            Timeout::new(0, move || {
                crate::rerender_app_with_type(update_type);
            })
            .forget();
        });

        MapViewModel::initialize(&state);

        Ok(Self {
            state,
            root,
            _network: network,
        })
    }

    /// Re-render completo
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] render()");
        clear_children(&self.root);
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;

        // El contenedor del mapa se acaba de re-adjuntar
        MapViewModel::refresh_size(&self.state);
        Ok(())
    }

    /// Actualización incremental del DOM (solo elementos específicos)
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::Toasts => update_toasts(&self.state),
            IncrementalUpdate::LoadingProgress => update_loading_progress(&self.state),
            IncrementalUpdate::NetworkBanner => update_network_banner(&self.state),
            IncrementalUpdate::Diagnostics => update_diagnostics(&self.state),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
