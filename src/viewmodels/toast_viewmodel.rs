// ============================================================================
// TOAST VIEWMODEL - Notificaciones efímeras con auto-cierre
// ============================================================================

use gloo_timers::callback::Timeout;

use crate::config::CONFIG;
use crate::models::Toast;
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::utils::t;

pub struct ToastViewModel;

impl ToastViewModel {
    /// Muestra el toast y programa su cierre
    pub fn push(state: &AppState, toast: Toast) -> u32 {
        if toast.is_destructive() {
            log::warn!("🔔 [TOAST] {}: {}", toast.title, toast.description);
        } else {
            log::info!("🔔 [TOAST] {}: {}", toast.title, toast.description);
        }

        let id = state.push_toast(toast);
        state.notify_with_type(UpdateType::Incremental(IncrementalUpdate::Toasts));

        let state_clone = state.clone();
        Timeout::new(CONFIG.toast_duration_ms, move || {
            Self::dismiss(&state_clone, id);
        })
        .forget();

        id
    }

    /// Toast normal a partir de claves i18n; `description` ya traducida
    pub fn info(state: &AppState, title_key: &str, description: impl Into<String>) -> u32 {
        let title = t(title_key, &state.lang());
        Self::push(state, Toast::info(title, description))
    }

    /// Toast destructivo con título y descripción traducidos
    pub fn error(state: &AppState, title_key: &str, description_key: &str) -> u32 {
        let lang = state.lang();
        Self::push(state, Toast::error(t(title_key, &lang), t(description_key, &lang)))
    }

    pub fn dismiss(state: &AppState, id: u32) {
        if state.remove_toast(id) {
            state.notify_with_type(UpdateType::Incremental(IncrementalUpdate::Toasts));
        }
    }
}
