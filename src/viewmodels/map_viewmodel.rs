// ============================================================================
// MAP VIEWMODEL - Ciclo de vida del mapa y selección de ubicación
// ============================================================================
// Carga: conectividad → Leaflet (CSS + JS) → creación del mapa.
// Cada carga lleva un número de generación; los resultados de cargas
// anteriores (p.ej. un reintento pulsado a mitad de carga) se descartan.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::config::CONFIG;
use crate::maps::{LeafletMap, MapHandlers, MapRenderer};
use crate::models::{Coordinates, LocationData, MapError, MapLayer};
use crate::services::geocoding_service::GeocodingService;
use crate::services::geolocation_service::{GeolocationOptions, GeolocationService};
use crate::services::leaflet_loader::LeafletLoader;
use crate::services::network_monitor::{check_connectivity, NetworkStatus};
use crate::state::{AppState, IncrementalUpdate, ReconnectAction, RetryDecision, UpdateType};
use crate::utils::t;
use crate::viewmodels::ToastViewModel;

pub struct MapViewModel;

impl MapViewModel {
    /// Primera carga al arrancar la app
    pub fn initialize(state: &AppState) {
        let state = state.clone();
        spawn_local(async move {
            Self::load(&state, false).await;
        });
    }

    /// Botón "Reintentar" y reconexión
    pub fn retry(state: &AppState) {
        let decision = state.lifecycle.borrow_mut().begin_retry();
        match decision {
            RetryDecision::Exhausted => {
                log::warn!("⛔ [MAP] Máximo de reintentos alcanzado");
                state.notify_subscribers();
            }
            RetryDecision::Proceed { attempt } => {
                log::info!("🔄 [MAP] Reintento {}/{}", attempt, state.lifecycle.borrow().max_retries());
                let state = state.clone();
                spawn_local(async move {
                    Self::load(&state, true).await;
                });
            }
        }
    }

    async fn load(state: &AppState, is_retry: bool) {
        let generation = state.next_load_generation();
        Self::teardown(state);
        state.lifecycle.borrow_mut().start_loading();
        state.notify_subscribers();

        if !check_connectivity().await {
            if !state.is_current_load(generation) {
                return;
            }
            let error = if is_retry {
                MapError::offline()
            } else {
                MapError::load_failure("Sin conexión a internet")
            };
            Self::fail(state, error);
            return;
        }

        let progress_state = state.clone();
        let loaded = LeafletLoader::load(move |progress| {
            if progress_state.is_current_load(generation) {
                progress_state.lifecycle.borrow_mut().set_progress(progress);
                progress_state.notify_with_type(UpdateType::Incremental(IncrementalUpdate::LoadingProgress));
            }
        })
        .await;

        if !state.is_current_load(generation) {
            log::info!("⏭️ [MAP] Carga {} descartada (hay una más reciente)", generation);
            return;
        }
        if let Err(e) = loaded {
            Self::fail(state, MapError::load_failure(e.to_string()));
            return;
        }

        match Self::create_map(state) {
            Ok(map) => {
                state.set_map(Box::new(map));
                state.lifecycle.borrow_mut().mark_ready();
                log::info!("✅ [MAP] Mapa listo");
                ToastViewModel::info(state, "toast_mapa_cargado", t("toast_mapa_cargado_desc", &state.lang()));
                state.notify_subscribers();
            }
            Err(e) => Self::fail(state, MapError::initialization(e)),
        }
    }

    fn fail(state: &AppState, error: MapError) {
        log::error!("❌ [MAP] {}", error);
        state.lifecycle.borrow_mut().fail(error);
        state.notify_subscribers();
    }

    fn create_map(state: &AppState) -> Result<LeafletMap, String> {
        let container = state
            .map_container
            .borrow()
            .clone()
            .filter(|c| c.is_connected())
            .ok_or_else(|| "Contenedor del mapa no encontrado".to_string())?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "El contenedor del mapa no es un HtmlElement".to_string())?;

        let click_state = state.clone();
        let drag_state = state.clone();
        let handlers = MapHandlers {
            on_click: Rc::new(move |coords| Self::on_map_click(&click_state, coords)),
            on_marker_drag: Rc::new(move |coords| Self::on_marker_drag(&drag_state, coords)),
        };

        let layer = *state.map_layer.borrow();
        LeafletMap::create(&container, &CONFIG.map_config, layer, handlers)
    }

    fn on_map_click(state: &AppState, coords: Coordinates) {
        if !coords.is_valid() {
            ToastViewModel::error(state, "error", "toast_error_clic");
            return;
        }
        Self::select_point(state, coords, None);
    }

    fn on_marker_drag(state: &AppState, coords: Coordinates) {
        if !coords.is_valid() {
            ToastViewModel::error(state, "error", "toast_error_arrastre");
            return;
        }
        Self::select_point(state, coords, None);
    }

    /// Lanza `update_location` en segundo plano
    pub fn select_point(state: &AppState, coords: Coordinates, address: Option<String>) {
        let state = state.clone();
        spawn_local(async move {
            Self::update_location(&state, coords, address).await;
        });
    }

    /// Mueve marcador, centra, resuelve la dirección y la deja seleccionada
    pub async fn update_location(state: &AppState, coords: Coordinates, address: Option<String>) {
        if !coords.is_valid() {
            ToastViewModel::error(state, "error", "toast_error_actualizar");
            return;
        }

        // Una selección posterior invalida la respuesta de geocodificación de esta
        let selection = state.next_selection_generation();

        let moved = state.with_map(|map| {
            map.set_marker(coords)?;
            map.pan_to(coords)
        });
        if let Some(Err(e)) = moved {
            log::error!("❌ [MAP] Error moviendo el marcador: {}", e);
            ToastViewModel::error(state, "error", "toast_error_actualizar");
            return;
        }

        let address = match address {
            Some(address) => address,
            None => GeocodingService::new().reverse_or_fallback(coords).await,
        };
        if !state.is_current_selection(selection) {
            log::info!("⏭️ [MAP] Selección {} descartada (hay una más reciente)", selection);
            return;
        }

        log::info!("📍 [MAP] Ubicación seleccionada: {} ({})", address, coords);
        *state.selected_location.borrow_mut() = Some(LocationData::new(coords, address.clone()));
        ToastViewModel::info(state, "toast_ubicacion_seleccionada", address);
        state.notify_subscribers();
    }

    /// Centra con el zoom de enfoque; errores solo se registran
    pub fn focus(state: &AppState, coords: Coordinates) {
        if let Some(Err(e)) = state.with_map(|map| map.set_view(coords, CONFIG.map_config.focus_zoom)) {
            log::warn!("⚠️ [MAP] No se pudo centrar el mapa: {}", e);
        }
    }

    /// Botón "Mi ubicación"
    pub fn use_current_location(state: &AppState) {
        if !GeolocationService::is_supported() {
            ToastViewModel::error(state, "toast_error_geolocalizacion", "geo_no_soportada");
            return;
        }
        if *state.locating.borrow() {
            return;
        }

        *state.locating.borrow_mut() = true;
        state.notify_subscribers();

        let state = state.clone();
        spawn_local(async move {
            match GeolocationService::current_position(GeolocationOptions::for_selector()).await {
                Ok(position) => {
                    log::info!("🛰️ [GEO] Posición actual: {} (±{}m)", position.coords, position.accuracy);
                    Self::focus(&state, position.coords);
                    Self::update_location(&state, position.coords, None).await;
                }
                Err(e) => {
                    ToastViewModel::error(&state, "toast_error_geolocalizacion", e.user_message_key());
                }
            }
            *state.locating.borrow_mut() = false;
            state.notify_subscribers();
        });
    }

    /// Selector de tipo de mapa
    pub fn change_layer(state: &AppState, key: &str) {
        let layer = match MapLayer::from_key(key) {
            Some(layer) => layer,
            None => {
                log::warn!("⚠️ [MAP] Capa desconocida: {}", key);
                ToastViewModel::error(state, "error", "toast_error_capa");
                return;
            }
        };

        state.set_map_layer(layer);
        if let Some(Err(e)) = state.with_map(|map| map.switch_layer(layer)) {
            log::error!("❌ [MAP] Error cambiando capa: {}", e);
            ToastViewModel::error(state, "error", "toast_error_capa");
        }
        state.notify_subscribers();
    }

    /// Eventos online/offline del navegador
    pub fn handle_network_change(state: &AppState, status: NetworkStatus) {
        match status {
            NetworkStatus::Offline => {
                *state.is_online.borrow_mut() = false;
                state.lifecycle.borrow_mut().fail(MapError::offline());
                state.notify_subscribers();
            }
            NetworkStatus::Online | NetworkStatus::Unknown => {
                *state.is_online.borrow_mut() = true;
                let action = state.lifecycle.borrow().on_reconnect();
                match action {
                    ReconnectAction::Retry => {
                        ToastViewModel::info(
                            state,
                            "toast_conexion_restaurada",
                            t("toast_reintentando", &state.lang()),
                        );
                        Self::retry(state);
                    }
                    ReconnectAction::Refresh => {
                        state.notify_with_type(UpdateType::Incremental(IncrementalUpdate::NetworkBanner));
                    }
                }
            }
        }
    }

    /// Destruye el mapa vivo (antes de recrearlo)
    pub fn teardown(state: &AppState) {
        if let Some(mut map) = state.take_map() {
            map.destroy();
        }
    }

    /// Tras re-adjuntar el contenedor en un render
    pub fn refresh_size(state: &AppState) {
        if let Ok(map) = state.map.try_borrow() {
            if let Some(map) = map.as_ref() {
                map.invalidate_size();
            }
        }
    }
}
