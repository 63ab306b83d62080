// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_sys::Element;

use crate::config::CONFIG;
use crate::maps::MapRenderer;
use crate::models::{DiagnosticResult, LocationData, MapLayer, SearchResult, Toast};
use crate::state::map_lifecycle::MapLifecycle;
use crate::utils::storage::{load_string_pref, save_string_pref};
use crate::utils::{normalize_language, DIAGNOSTICS_ROUTE_HASH, PREF_LANGUAGE_KEY, PREF_MAP_LAYER_KEY};

/// Pantalla activa (según el hash de la URL)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Selector,
    Diagnostics,
}

impl Route {
    pub fn from_hash(hash: &str) -> Self {
        if hash.trim_end_matches('/') == DIAGNOSTICS_ROUTE_HASH {
            Route::Diagnostics
        } else {
            Route::Selector
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Route::Selector => "#/",
            Route::Diagnostics => DIAGNOSTICS_ROUTE_HASH,
        }
    }
}

/// Tipo de actualización del DOM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Actualización incremental (solo elementos específicos)
    Incremental(IncrementalUpdate),
    FullRender,
}

/// Zonas que se pueden actualizar sin re-render completo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    Toasts,
    /// Barra de progreso de la carga del mapa
    LoadingProgress,
    /// Banner "Sin conexión"
    NetworkBanner,
    /// Lista de resultados del diagnóstico
    Diagnostics,
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    // Mapa
    pub lifecycle: Rc<RefCell<MapLifecycle>>,
    pub map_layer: Rc<RefCell<MapLayer>>,
    /// Contenedor del mapa: se crea una vez y se re-adjunta en cada render
    pub map_container: Rc<RefCell<Option<Element>>>,
    pub map: Rc<RefCell<Option<Box<dyn MapRenderer>>>>,
    load_generation: Rc<Cell<u32>>,
    selection_generation: Rc<Cell<u32>>,

    pub is_online: Rc<RefCell<bool>>,

    // Selección y búsqueda
    pub selected_location: Rc<RefCell<Option<LocationData>>>,
    pub search_query: Rc<RefCell<String>>,
    pub search_results: Rc<RefCell<Vec<SearchResult>>>,
    pub is_searching: Rc<RefCell<bool>>,
    pub locating: Rc<RefCell<bool>>,
    pub saved_locations: Rc<RefCell<Vec<LocationData>>>,

    // UI
    pub toasts: Rc<RefCell<Vec<Toast>>>,
    next_toast_id: Rc<Cell<u32>>,
    pub language: Rc<RefCell<String>>,
    pub route: Rc<RefCell<Route>>,

    // Diagnóstico
    pub diagnostics: Rc<RefCell<Vec<DiagnosticResult>>>,
    pub diagnostics_running: Rc<RefCell<bool>>,

    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn(UpdateType)>>>>,
}

impl AppState {
    /// Estado inicial con las preferencias guardadas en localStorage
    pub fn new() -> Self {
        let language = load_string_pref(PREF_LANGUAGE_KEY)
            .map(|lang| normalize_language(&lang))
            .unwrap_or_else(|| normalize_language(&CONFIG.default_language));
        let layer = load_string_pref(PREF_MAP_LAYER_KEY)
            .and_then(|key| MapLayer::from_key(&key))
            .unwrap_or_default();
        let online = crate::services::network_monitor::navigator_on_line().unwrap_or(true);

        Self::with_preferences(language, layer, online)
    }

    pub fn with_preferences(language: String, layer: MapLayer, is_online: bool) -> Self {
        Self {
            lifecycle: Rc::new(RefCell::new(MapLifecycle::default())),
            map_layer: Rc::new(RefCell::new(layer)),
            map_container: Rc::new(RefCell::new(None)),
            map: Rc::new(RefCell::new(None)),
            load_generation: Rc::new(Cell::new(0)),
            selection_generation: Rc::new(Cell::new(0)),

            is_online: Rc::new(RefCell::new(is_online)),

            selected_location: Rc::new(RefCell::new(None)),
            search_query: Rc::new(RefCell::new(String::new())),
            search_results: Rc::new(RefCell::new(Vec::new())),
            is_searching: Rc::new(RefCell::new(false)),
            locating: Rc::new(RefCell::new(false)),
            saved_locations: Rc::new(RefCell::new(Vec::new())),

            toasts: Rc::new(RefCell::new(Vec::new())),
            next_toast_id: Rc::new(Cell::new(1)),
            language: Rc::new(RefCell::new(language)),
            route: Rc::new(RefCell::new(Route::Selector)),

            diagnostics: Rc::new(RefCell::new(Vec::new())),
            diagnostics_running: Rc::new(RefCell::new(false)),

            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn lang(&self) -> String {
        self.language.borrow().clone()
    }

    /// Establecer language y guardar en localStorage
    pub fn set_language(&self, lang: &str) {
        let lang = normalize_language(lang);
        save_string_pref(PREF_LANGUAGE_KEY, &lang);
        *self.language.borrow_mut() = lang;
    }

    /// Establecer la capa base y guardar en localStorage
    pub fn set_map_layer(&self, layer: MapLayer) {
        *self.map_layer.borrow_mut() = layer;
        save_string_pref(PREF_MAP_LAYER_KEY, layer.key());
    }

    pub fn online(&self) -> bool {
        *self.is_online.borrow()
    }

    // ------------------------------------------------------------------
    // Toasts
    // ------------------------------------------------------------------

    /// Añade un toast y devuelve su id
    pub fn push_toast(&self, mut toast: Toast) -> u32 {
        let id = self.next_toast_id.get();
        self.next_toast_id.set(id.wrapping_add(1));
        toast.id = id;
        self.toasts.borrow_mut().push(toast);
        id
    }

    /// Quita un toast; false si ya no estaba
    pub fn remove_toast(&self, id: u32) -> bool {
        let mut toasts = self.toasts.borrow_mut();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    // ------------------------------------------------------------------
    // Mapa vivo
    // ------------------------------------------------------------------

    pub fn set_map(&self, map: Box<dyn MapRenderer>) {
        *self.map.borrow_mut() = Some(map);
    }

    pub fn take_map(&self) -> Option<Box<dyn MapRenderer>> {
        self.map.borrow_mut().take()
    }

    pub fn has_map(&self) -> bool {
        self.map.borrow().as_ref().map(|m| m.is_ready()).unwrap_or(false)
    }

    /// Ejecuta `f` sobre el mapa si existe
    pub fn with_map<R>(&self, f: impl FnOnce(&mut dyn MapRenderer) -> R) -> Option<R> {
        let mut map = self.map.borrow_mut();
        map.as_mut().map(|m| f(m.as_mut()))
    }

    /// Nueva carga del mapa; invalida las anteriores que sigan en vuelo
    pub fn next_load_generation(&self) -> u32 {
        let generation = self.load_generation.get().wrapping_add(1);
        self.load_generation.set(generation);
        generation
    }

    pub fn is_current_load(&self, generation: u32) -> bool {
        self.load_generation.get() == generation
    }

    /// Igual que las cargas: solo la selección más reciente escribe `selected_location`
    pub fn next_selection_generation(&self) -> u32 {
        let generation = self.selection_generation.get().wrapping_add(1);
        self.selection_generation.set(generation);
        generation
    }

    pub fn is_current_selection(&self, generation: u32) -> bool {
        self.selection_generation.get() == generation
    }

    // ------------------------------------------------------------------
    // Reactividad
    // ------------------------------------------------------------------

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(UpdateType) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Re-render completo
    pub fn notify_subscribers(&self) {
        self.notify_with_type(UpdateType::FullRender);
    }

    pub fn notify_with_type(&self, update_type: UpdateType) {
        // Copia: un subscriber puede suscribir a otros
        let subscribers: Vec<_> = self.change_subscribers.borrow().iter().cloned().collect();
        for callback in subscribers {
            callback(update_type);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::with_preferences("ES".to_string(), MapLayer::Osm, true)
    }

    #[test]
    fn route_from_hash() {
        assert_eq!(Route::from_hash("#/diagnostico"), Route::Diagnostics);
        assert_eq!(Route::from_hash("#/diagnostico/"), Route::Diagnostics);
        assert_eq!(Route::from_hash(""), Route::Selector);
        assert_eq!(Route::from_hash("#/otra"), Route::Selector);
        assert_eq!(Route::from_hash(Route::Diagnostics.hash()), Route::Diagnostics);
    }

    #[test]
    fn toasts_get_increasing_ids() {
        let s = state();
        let a = s.push_toast(Toast::info("a", ""));
        let b = s.push_toast(Toast::error("b", ""));
        assert!(b > a);
        assert_eq!(s.toasts.borrow().len(), 2);

        assert!(s.remove_toast(a));
        assert!(!s.remove_toast(a));
        assert_eq!(s.toasts.borrow()[0].title, "b");
    }

    #[test]
    fn subscribers_receive_update_type() {
        let s = state();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        s.subscribe_to_changes(move |t| sink.borrow_mut().push(t));

        s.notify_subscribers();
        s.notify_with_type(UpdateType::Incremental(IncrementalUpdate::Toasts));

        assert_eq!(
            *seen.borrow(),
            vec![
                UpdateType::FullRender,
                UpdateType::Incremental(IncrementalUpdate::Toasts)
            ]
        );
    }

    #[test]
    fn newer_load_invalidates_older() {
        let s = state();
        let first = s.next_load_generation();
        let second = s.next_load_generation();
        assert!(!s.is_current_load(first));
        assert!(s.is_current_load(second));
    }

    #[test]
    fn later_selection_wins_over_slower_one() {
        let s = state();
        let first_click = s.next_selection_generation();
        let second_click = s.clone().next_selection_generation();
        assert!(!s.is_current_selection(first_click));
        assert!(s.is_current_selection(second_click));
        // Las cargas del mapa llevan su propio contador
        assert!(s.is_current_load(0));
    }

    #[test]
    fn clones_share_state() {
        let s = state();
        let other = s.clone();
        *other.search_query.borrow_mut() = "Lima".to_string();
        assert_eq!(*s.search_query.borrow(), "Lima");
        assert!(!s.has_map());
    }
}
