// ============================================================================
// MAP LIFECYCLE - Máquina de estados de la carga del mapa (sin DOM)
// ============================================================================
// Loading{progress} → Ready | Failed(error); Failed → Loading vía reintento,
// con un máximo de reintentos. Un éxito reinicia el contador.
// ============================================================================

use crate::config::CONFIG;
use crate::models::MapError;

#[derive(Debug, Clone, PartialEq)]
pub enum MapPhase {
    Loading { progress: u8 },
    Ready,
    Failed(MapError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Se alcanzó el máximo; la fase pasa a Failed(retries_exhausted)
    Exhausted,
    Proceed { attempt: u32 },
}

/// Qué hacer cuando vuelve la conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectAction {
    /// El mapa falló por la red: aviso + reintento
    Retry,
    /// Nada que recargar; solo se refresca la vista
    Refresh,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLifecycle {
    phase: MapPhase,
    retry_count: u32,
    max_retries: u32,
}

impl MapLifecycle {
    pub fn new(max_retries: u32) -> Self {
        Self {
            phase: MapPhase::Loading { progress: 0 },
            retry_count: 0,
            max_retries,
        }
    }

    pub fn phase(&self) -> &MapPhase {
        &self.phase
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn is_ready(&self) -> bool {
        self.phase == MapPhase::Ready
    }

    pub fn progress(&self) -> Option<u8> {
        match self.phase {
            MapPhase::Loading { progress } => Some(progress),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MapError> {
        match &self.phase {
            MapPhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn start_loading(&mut self) {
        self.phase = MapPhase::Loading { progress: 0 };
    }

    /// Solo tiene efecto mientras se está cargando
    pub fn set_progress(&mut self, progress: u8) {
        if let MapPhase::Loading { .. } = self.phase {
            self.phase = MapPhase::Loading {
                progress: progress.min(100),
            };
        }
    }

    pub fn mark_ready(&mut self) {
        self.phase = MapPhase::Ready;
        self.retry_count = 0;
    }

    pub fn fail(&mut self, error: MapError) {
        self.phase = MapPhase::Failed(error);
    }

    pub fn begin_retry(&mut self) -> RetryDecision {
        if self.retry_count >= self.max_retries {
            self.phase = MapPhase::Failed(MapError::retries_exhausted());
            return RetryDecision::Exhausted;
        }
        self.retry_count += 1;
        self.phase = MapPhase::Loading { progress: 0 };
        RetryDecision::Proceed {
            attempt: self.retry_count,
        }
    }

    pub fn on_reconnect(&self) -> ReconnectAction {
        match self.error() {
            Some(error) if error.is_network() => ReconnectAction::Retry,
            _ => ReconnectAction::Refresh,
        }
    }

    /// "n/max" para el botón y el panel de diagnóstico
    pub fn retry_label(&self) -> String {
        format!("{}/{}", self.retry_count, self.max_retries)
    }
}

impl Default for MapLifecycle {
    fn default() -> Self {
        Self::new(CONFIG.max_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MapErrorKind;

    #[test]
    fn starts_loading_from_zero() {
        let lifecycle = MapLifecycle::new(3);
        assert_eq!(lifecycle.progress(), Some(0));
        assert_eq!(lifecycle.retry_label(), "0/3");
    }

    #[test]
    fn progress_is_clamped_and_ignored_outside_loading() {
        let mut lifecycle = MapLifecycle::new(3);
        lifecycle.set_progress(50);
        assert_eq!(lifecycle.progress(), Some(50));
        lifecycle.set_progress(250);
        assert_eq!(lifecycle.progress(), Some(100));

        lifecycle.mark_ready();
        lifecycle.set_progress(10);
        assert_eq!(lifecycle.phase(), &MapPhase::Ready);
    }

    #[test]
    fn retries_stop_at_maximum() {
        let mut lifecycle = MapLifecycle::new(3);
        lifecycle.fail(MapError::offline());

        for expected in 1..=3 {
            assert_eq!(lifecycle.begin_retry(), RetryDecision::Proceed { attempt: expected });
            assert_eq!(lifecycle.progress(), Some(0));
            lifecycle.fail(MapError::load_failure("Timeout cargando Leaflet"));
        }
        assert_eq!(lifecycle.retry_label(), "3/3");

        assert_eq!(lifecycle.begin_retry(), RetryDecision::Exhausted);
        assert_eq!(lifecycle.retry_count(), 3);
        let error = lifecycle.error().unwrap();
        assert_eq!(error.message, "Máximo número de reintentos alcanzado");
        assert_eq!(error.kind, MapErrorKind::Unknown);
    }

    #[test]
    fn success_resets_retry_count() {
        let mut lifecycle = MapLifecycle::new(3);
        lifecycle.fail(MapError::offline());
        lifecycle.begin_retry();
        lifecycle.begin_retry();
        assert_eq!(lifecycle.retry_label(), "2/3");

        lifecycle.mark_ready();
        assert!(lifecycle.is_ready());
        assert_eq!(lifecycle.retry_count(), 0);
        assert!(lifecycle.error().is_none());
    }

    #[test]
    fn reconnect_retries_only_network_failures() {
        let mut lifecycle = MapLifecycle::new(3);
        assert_eq!(lifecycle.on_reconnect(), ReconnectAction::Refresh);

        lifecycle.fail(MapError::offline());
        assert_eq!(lifecycle.on_reconnect(), ReconnectAction::Retry);

        lifecycle.fail(MapError::load_failure("Sin conexión a internet"));
        assert_eq!(lifecycle.on_reconnect(), ReconnectAction::Retry);

        lifecycle.fail(MapError::load_failure("Timeout cargando Leaflet"));
        assert_eq!(lifecycle.on_reconnect(), ReconnectAction::Refresh);

        lifecycle.fail(MapError::initialization("Contenedor del mapa no encontrado"));
        assert_eq!(lifecycle.on_reconnect(), ReconnectAction::Refresh);

        lifecycle.mark_ready();
        assert_eq!(lifecycle.on_reconnect(), ReconnectAction::Refresh);
    }
}
