// ============================================================================
// MONITOR DE ESTADO DE RED
// ============================================================================
// Detecta cambios en la conectividad (online/offline) para pasar el mapa a
// error de red o reintentar la carga cuando vuelve la conexión
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::{Method, Request};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event, RequestCache, RequestMode};

use crate::utils::CONNECTIVITY_PROBE_URL;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NetworkStatus {
    Online,
    Offline,
    Unknown,
}

impl NetworkStatus {
    pub fn from_navigator(on_line: Option<bool>) -> Self {
        match on_line {
            Some(true) => NetworkStatus::Online,
            Some(false) => NetworkStatus::Offline,
            None => NetworkStatus::Unknown,
        }
    }

    /// Unknown se trata como conectado: solo un "offline" explícito bloquea
    pub fn is_online(&self) -> bool {
        !matches!(self, NetworkStatus::Offline)
    }
}

/// Lee `navigator.onLine`
pub fn navigator_on_line() -> Option<bool> {
    let window = window()?;
    let navigator = js_sys::Reflect::get(&window, &JsValue::from_str("navigator")).ok()?;
    js_sys::Reflect::get(&navigator, &JsValue::from_str("onLine"))
        .ok()
        .and_then(|v| v.as_bool())
}

/// Monitor de estado de red con listeners de eventos.
/// Los listeners son globales (window): se registran una sola vez.
pub struct NetworkMonitor {
    status: Rc<Cell<NetworkStatus>>,
    monitoring_started: Cell<bool>,
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self {
            status: Rc::new(Cell::new(NetworkStatus::from_navigator(navigator_on_line()))),
            monitoring_started: Cell::new(false),
        }
    }

    /// Iniciar monitoreo de eventos de red
    pub fn start_monitoring<F>(&self, callback: F)
    where
        F: Fn(NetworkStatus) + 'static,
    {
        if self.monitoring_started.replace(true) {
            log::warn!("⚠️ [NETWORK] start_monitoring ya fue llamado, ignorando llamada duplicada");
            return;
        }

        let window = match window() {
            Some(w) => w,
            None => return,
        };

        let callback = Rc::new(callback);

        let online_closure = Closure::wrap(Box::new({
            let status = self.status.clone();
            let callback = callback.clone();
            move |_event: Event| {
                log::info!("🌐 [NETWORK] ONLINE");
                status.set(NetworkStatus::Online);
                callback(NetworkStatus::Online);
            }
        }) as Box<dyn FnMut(Event)>);

        let offline_closure = Closure::wrap(Box::new({
            let status = self.status.clone();
            let callback = callback.clone();
            move |_event: Event| {
                log::warn!("📴 [NETWORK] OFFLINE");
                status.set(NetworkStatus::Offline);
                callback(NetworkStatus::Offline);
            }
        }) as Box<dyn FnMut(Event)>);

        let registered = window
            .add_event_listener_with_callback("online", online_closure.as_ref().unchecked_ref())
            .and_then(|_| {
                window.add_event_listener_with_callback("offline", offline_closure.as_ref().unchecked_ref())
            });
        if let Err(e) = registered {
            log::error!("❌ [NETWORK] No se pudieron registrar los listeners: {:?}", e);
        }

        // Los listeners de window viven lo mismo que la app
        online_closure.forget();
        offline_closure.forget();

        log::info!("✅ [NETWORK] Listeners registrados (solo una vez)");
    }

    /// Obtener estado actual de red
    pub fn current_status(&self) -> NetworkStatus {
        self.status.get()
    }

    pub fn is_online(&self) -> bool {
        self.current_status().is_online()
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Comprueba conectividad real pidiendo un tile de OSM (HEAD, no-cors).
/// En modo no-cors la respuesta es opaca: solo importa que la petición no falle.
pub async fn check_connectivity() -> bool {
    let result = Request::get(CONNECTIVITY_PROBE_URL)
        .method(Method::HEAD)
        .mode(RequestMode::NoCors)
        .cache(RequestCache::NoCache)
        .send()
        .await;

    match result {
        Ok(_) => true,
        Err(e) => {
            log::warn!("📴 [NETWORK] Sin acceso a los servidores de mapas: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_navigator_flag() {
        assert_eq!(NetworkStatus::from_navigator(Some(true)), NetworkStatus::Online);
        assert_eq!(NetworkStatus::from_navigator(Some(false)), NetworkStatus::Offline);
        assert_eq!(NetworkStatus::from_navigator(None), NetworkStatus::Unknown);
    }

    #[test]
    fn unknown_counts_as_online() {
        assert!(NetworkStatus::Unknown.is_online());
        assert!(NetworkStatus::Online.is_online());
        assert!(!NetworkStatus::Offline.is_online());
    }
}
